//! 数据模型定义
//!
//! CLI 与存储层共用的类型:
//! - RecipeFeedback: 远程模型返回的结构化点评
//! - Category / CategoryFilter: 历史记录分类与筛选
//! - HistoryRecord: 一次保存下来的点评记录
//! - AnalysisStatus: 提交流程的四种状态

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AI点评结果
///
/// 六个字段全部必填，缺任何一个都按解析失败处理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFeedback {
    pub recipe_name: String,
    /// 避坑指南
    pub precautions: Vec<String>,
    /// 美味关键
    pub texture_secrets: Vec<String>,
    /// 提鲜妙招
    pub flavor_enhancements: Vec<String>,
    /// 摆盘美学
    pub plating_techniques: Vec<String>,
    pub encouragement: String,
}

impl RecipeFeedback {
    /// 按展示顺序返回 (标题, 条目) 四个分区
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("避坑指南", &self.precautions),
            ("美味关键", &self.texture_secrets),
            ("提鲜妙招", &self.flavor_enhancements),
            ("摆盘美学", &self.plating_techniques),
        ]
    }
}

/// 用户给历史记录打的分类标签
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "未分类")]
    Uncategorized,
    #[serde(rename = "家常小炒")]
    StirFry,
    #[serde(rename = "硬核大菜")]
    Showpiece,
    #[serde(rename = "甜蜜烘焙")]
    Baking,
    #[serde(rename = "快手餐")]
    Quick,
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    /// 展示顺序
    pub const ALL: [Category; 6] = [
        Category::Uncategorized,
        Category::StirFry,
        Category::Showpiece,
        Category::Baking,
        Category::Quick,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Uncategorized => "未分类",
            Category::StirFry => "家常小炒",
            Category::Showpiece => "硬核大菜",
            Category::Baking => "甜蜜烘焙",
            Category::Quick => "快手餐",
            Category::Other => "其他",
        }
    }

    /// 命令行里可以用的 ASCII 别名
    pub fn alias(&self) -> &'static str {
        match self {
            Category::Uncategorized => "uncategorized",
            Category::StirFry => "stir-fry",
            Category::Showpiece => "showpiece",
            Category::Baking => "baking",
            Category::Quick => "quick",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s || c.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names = Category::ALL
                    .iter()
                    .map(|c| format!("{}({})", c.label(), c.alias()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("未知分类: {}。可选: {}", s, names)
            })
    }
}

/// 历史记录筛选条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "全部";

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == Self::ALL_LABEL || trimmed.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        trimmed.parse().map(CategoryFilter::Only)
    }
}

/// 一次点评的历史记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// 由创建时间（毫秒）生成的唯一ID
    pub id: String,
    /// 创建时间（Unix毫秒）
    pub timestamp: i64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub user_input_text: String,
    /// data URL 形式的图片（data:image/jpeg;base64,...）
    #[serde(default)]
    pub user_input_image: Option<String>,
    pub feedback: RecipeFeedback,
}

impl HistoryRecord {
    pub fn new(
        id: String,
        timestamp: i64,
        user_input_text: String,
        user_input_image: Option<String>,
        feedback: RecipeFeedback,
    ) -> Self {
        Self {
            id,
            timestamp,
            category: Category::default(),
            user_input_text,
            user_input_image,
            feedback,
        }
    }
}

/// 提交流程状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
