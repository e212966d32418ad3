//! 点评卡片的文本渲染
//!
//! 终端显示和 Markdown 导出共用同一个版式，只是重点标注的处理不同。

use crate::error::ChefMentorError;
use chef_mentor_common::{render_ansi, strip_emphasis, CategoryFilter, HistoryRecord};
use chrono::{Local, TimeZone};

/// 重点标注的输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisMode {
    /// 终端加粗
    Ansi,
    /// 保留 `**` 给 Markdown
    Markdown,
    /// 去掉标注
    Strip,
}

impl EmphasisMode {
    fn apply(&self, text: &str) -> String {
        match self {
            EmphasisMode::Ansi => render_ansi(text),
            EmphasisMode::Markdown => text.to_string(),
            EmphasisMode::Strip => strip_emphasis(text),
        }
    }
}

/// 毫秒时间戳转本地日期时间
pub fn format_timestamp(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// 历史列表的一行
pub fn list_line(record: &HistoryRecord) -> String {
    format!(
        "{} · {} · {} · {}",
        record.id,
        format_timestamp(record.timestamp),
        record.category,
        record.feedback.recipe_name
    )
}

/// 历史列表的标题行，总数和筛选后的条数都显示
pub fn list_header(filter: CategoryFilter, total: usize, shown: usize) -> String {
    format!("历史记录（{}，共{}条，显示{}条）:", filter, total, shown)
}

/// 命令失败时给用户看的一行
pub fn error_line(err: &ChefMentorError) -> String {
    format!("错误: {}", err)
}

/// 整张卡片
pub fn render_card(record: &HistoryRecord, mode: EmphasisMode) -> String {
    let feedback = &record.feedback;
    let mut out = String::new();

    let heading = if mode == EmphasisMode::Markdown { "# " } else { "" };
    out.push_str(&format!("{}关于《{}》\n\n", heading, feedback.recipe_name));
    out.push_str(&format!(
        "分类: {} · {}\n\n",
        record.category,
        format_timestamp(record.timestamp)
    ));
    out.push_str(&format!("> “{}”\n", mode.apply(&feedback.encouragement)));

    for (title, items) in feedback.sections() {
        let heading = if mode == EmphasisMode::Markdown { "## " } else { "■ " };
        out.push_str(&format!("\n{}{}\n\n", heading, title));
        if items.is_empty() {
            out.push_str("- （暂无）\n");
        }
        for item in items {
            out.push_str(&format!("- {}\n", mode.apply(item)));
        }
    }

    if !record.user_input_text.trim().is_empty() {
        let heading = if mode == EmphasisMode::Markdown { "## " } else { "■ " };
        out.push_str(&format!("\n{}我的菜谱\n\n", heading));
        out.push_str(record.user_input_text.trim());
        out.push('\n');
    }

    out
}
