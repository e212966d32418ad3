use chef_mentor_common::{Category, CategoryFilter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chef-mentor")]
#[command(about = "ChefMentor 厨房成长笔记：菜谱AI点评与历史记录", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 历史记录目录（默认为系统数据目录）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 提交菜谱文字和/或照片，获取点评
    Analyze {
        /// 菜谱文字
        text: Option<String>,

        /// 菜品照片
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 保存后直接设置分类
        #[arg(short, long)]
        category: Option<Category>,

        /// 使用不带重点标注的提示词
        #[arg(long)]
        plain: bool,
    },

    /// 列出历史记录
    List {
        /// 按分类筛选（全部/未分类/家常小炒/硬核大菜/甜蜜烘焙/快手餐/其他）
        #[arg(short, long, default_value = "全部")]
        category: CategoryFilter,
    },

    /// 显示一条记录的点评
    Show {
        /// 记录ID
        #[arg(required = true)]
        id: String,
    },

    /// 删除一条记录
    Delete {
        /// 记录ID
        #[arg(required = true)]
        id: String,

        /// 不再确认
        #[arg(short, long)]
        yes: bool,
    },

    /// 修改记录的分类（省略分类时交互选择）
    Category {
        /// 记录ID
        #[arg(required = true)]
        id: String,

        /// 新分类
        category: Option<Category>,
    },

    /// 导出一条记录
    Export {
        /// 记录ID
        #[arg(required = true)]
        id: String,

        /// 输出格式 (markdown/json)
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// 输出文件或目录（默认当前目录）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 显示/修改设置
    Config {
        /// 设置API密钥
        #[arg(long)]
        set_api_key: Option<String>,

        /// 设置模型名
        #[arg(long)]
        set_model: Option<String>,

        /// 重点标注 (on/off)
        #[arg(long)]
        emphasis: Option<Toggle>,

        /// 显示设置
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use markdown or json", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(Toggle::On),
            "off" | "false" | "no" | "0" => Ok(Toggle::Off),
            _ => Err(format!("Unknown value: {}. Use on or off", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "chef-mentor",
            "analyze",
            "清蒸鲈鱼",
            "--category",
            "硬核大菜",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { text, image, category, plain } => {
                assert_eq!(text.as_deref(), Some("清蒸鲈鱼"));
                assert!(image.is_none());
                assert_eq!(category, Some(Category::Showpiece));
                assert!(!plain);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_list_default_filter() {
        let cli = Cli::try_parse_from(["chef-mentor", "list"]).unwrap();
        match cli.command {
            Commands::List { category } => assert_eq!(category, CategoryFilter::All),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["chef-mentor", "show", "123", "-v", "--data-dir", "/tmp/x"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["chef-mentor", "category", "1", "火锅"]).is_err());
    }
}
