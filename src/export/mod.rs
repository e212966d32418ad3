pub mod markdown;

use crate::cli::ExportFormat;
use crate::error::{ChefMentorError, Result};
use chef_mentor_common::HistoryRecord;
use std::path::{Path, PathBuf};

/// 文件名里不能用的字符换成下划线
fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "recipe".to_string()
    } else {
        cleaned
    }
}

fn default_file_name(record: &HistoryRecord, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        sanitize_file_stem(&record.feedback.recipe_name),
        record.id,
        extension
    )
}

pub fn output_path_for_format(output: &Path, record: &HistoryRecord, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name(record, extension))
    } else {
        output.to_path_buf()
    }
}

/// 导出一条记录，返回写出的文件路径
pub fn export_record(record: &HistoryRecord, format: &ExportFormat, output: &Path) -> Result<PathBuf> {
    let path = match format {
        ExportFormat::Markdown => {
            let path = output_path_for_format(output, record, "md");
            println!("- 生成 Markdown 卡片...");
            markdown::write_card(record, &path)?;
            path
        }
        ExportFormat::Json => {
            let path = output_path_for_format(output, record, "json");
            ensure_parent(&path)?;
            let json = serde_json::to_string_pretty(record)?;
            std::fs::write(&path, json)
                .map_err(|e| ChefMentorError::Export(format!("{}: {}", path.display(), e)))?;
            path
        }
    };

    tracing::info!("exported record {} to {}", record.id, path.display());
    Ok(path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChefMentorError::Export(format!("{}: {}", parent.display(), e)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("清蒸/鲈鱼?"), "清蒸_鲈鱼_");
        assert_eq!(sanitize_file_stem("   "), "recipe");
        assert_eq!(sanitize_file_stem("番茄炒蛋"), "番茄炒蛋");
    }
}
