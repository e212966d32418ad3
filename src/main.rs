use chef_mentor::{analyzer, cli, config, display, error, export, kv, logging, session, store};
use chef_mentor_common::{AnalysisStatus, Category, CategoryFilter, PromptStyle};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::{Confirm, Select};
use display::EmphasisMode;
use error::{ChefMentorError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use kv::FileKvStore;
use session::Session;
use std::path::{Path, PathBuf};
use std::time::Duration;
use store::HistoryStore;

fn open_store(config: &Config, data_dir: Option<&Path>) -> Result<HistoryStore<FileKvStore>> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => config.resolve_data_dir()?,
    };
    tracing::debug!("history dir: {}", dir.display());
    Ok(HistoryStore::load(FileKvStore::new(dir)))
}

fn find_record<'a>(
    store: &'a HistoryStore<FileKvStore>,
    id: &str,
) -> Result<&'a chef_mentor_common::HistoryRecord> {
    store
        .get(id)
        .ok_or_else(|| ChefMentorError::RecordNotFound(id.to_string()))
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", display::error_line(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Analyze { text, image, category, plain } => {
            println!("🍳 ChefMentor - 菜谱点评\n");

            let text = text.unwrap_or_default();
            let image = match image {
                Some(path) => {
                    println!("- 读取照片: {}", path.display());
                    Some(analyzer::load_image(&path, config.max_image_size)?)
                }
                None => None,
            };

            let mut session = Session::new(open_store(&config, data_dir)?);
            if !session.can_submit(&text, image.as_ref()) {
                println!("{}", ChefMentorError::MissingInput);
                return Ok(());
            }

            let style = if plain { PromptStyle::Plain } else { config.prompt_style() };
            let client = analyzer::GeminiClient::from_config(&config)?.with_prompt_style(style);

            let bar = spinner("老师正在认真看你的菜谱...");
            let now = chrono::Utc::now().timestamp_millis();
            let outcome = session.submit(&client, &text, image, now).await;
            bar.finish_and_clear();

            let id = match outcome {
                Ok(Some(record)) => record.id.clone(),
                Err(e) => {
                    if let Some(message) = session.error_message() {
                        eprintln!("{}", message);
                    }
                    return Err(e);
                }
                Ok(None) => {
                    if session.status() == AnalysisStatus::Error {
                        if let Some(message) = session.error_message() {
                            eprintln!("{}", message);
                        }
                        std::process::exit(1);
                    }
                    return Ok(());
                }
            };

            if let Some(category) = category {
                session.update_category(&id, category)?;
            }

            if let Some(record) = session.current() {
                println!("{}", display::render_card(record, EmphasisMode::Ansi));
                println!("✔ 已保存到历史记录 (ID: {})", record.id);
            }
        }

        Commands::List { category } => {
            let store = open_store(&config, data_dir)?;
            let total = store.len();
            let records: Vec<_> = store.filter(category).collect();

            if records.is_empty() {
                match category {
                    CategoryFilter::All => println!("还没有历史记录，快去做第一道菜吧！"),
                    CategoryFilter::Only(c) => println!("「{}」分类下还没有记录", c),
                }
                return Ok(());
            }

            println!("{}", display::list_header(category, total, records.len()));
            for record in records {
                println!("  {}", display::list_line(record));
            }
        }

        Commands::Show { id } => {
            let mut session = Session::new(open_store(&config, data_dir)?);
            match session.show(&id) {
                Some(record) => println!("{}", display::render_card(record, EmphasisMode::Ansi)),
                None => return Err(ChefMentorError::RecordNotFound(id)),
            }
        }

        Commands::Delete { id, yes } => {
            let mut store = open_store(&config, data_dir)?;
            let name = match store.get(&id) {
                Some(record) => record.feedback.recipe_name.clone(),
                None => {
                    println!("记录不存在: {}（无需删除）", id);
                    return Ok(());
                }
            };

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("确定删除《{}》({})吗？", name, id))
                    .default(false)
                    .interact()
                    .map_err(|e| ChefMentorError::Config(format!("输入错误: {}", e)))?;

            if confirmed {
                store.remove(&id)?;
                println!("✔ 已删除: {}", name);
            } else {
                println!("已取消");
            }
        }

        Commands::Category { id, category } => {
            let mut store = open_store(&config, data_dir)?;
            let current = find_record(&store, &id)?.category;

            let category = match category {
                Some(c) => c,
                None => {
                    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
                    let default = Category::ALL.iter().position(|c| *c == current).unwrap_or(0);
                    let index = Select::new()
                        .with_prompt("选择分类")
                        .items(&labels)
                        .default(default)
                        .interact()
                        .map_err(|e| ChefMentorError::Config(format!("输入错误: {}", e)))?;
                    Category::ALL[index]
                }
            };

            store.update_category(&id, category)?;
            println!("✔ 分类已改为「{}」", category);
        }

        Commands::Export { id, format, output } => {
            let store = open_store(&config, data_dir)?;
            let record = find_record(&store, &id)?;
            let output = output.unwrap_or_else(|| PathBuf::from("."));

            match export::export_record(record, &format, &output) {
                Ok(path) => println!("✔ 导出完成: {}", path.display()),
                Err(e) => {
                    eprintln!("导出失败: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { set_api_key, set_model, emphasis, show } => {
            let mut changed = false;

            if let Some(model) = set_model {
                config.model = model;
                changed = true;
            }
            if let Some(toggle) = emphasis {
                config.emphasize_key_phrases = toggle.is_on();
                changed = true;
            }

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ API密钥已设置");
            }

            if changed {
                config.save()?;
                println!("✔ 设置已保存");
            }

            if show || !changed {
                println!("设置:");
                println!("  模型: {}", config.model);
                println!("  图片最大边长: {}px", config.max_image_size);
                println!("  超时: {}秒", config.timeout_seconds);
                println!("  重点标注: {}", if config.emphasize_key_phrases { "开" } else { "关" });
                println!("  API密钥: {}", if config.get_api_key().is_ok() { "已设置" } else { "未设置" });
                let dir = match data_dir {
                    Some(dir) => Ok(dir.to_path_buf()),
                    None => config.resolve_data_dir(),
                };
                match dir {
                    Ok(dir) => println!("  数据目录: {}", dir.display()),
                    Err(e) => println!("  数据目录: {}", e),
                }
            }
        }
    }

    Ok(())
}
