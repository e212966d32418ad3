//! Markdown 卡片导出
//!
//! 有照片时在卡片旁边写一份 `<stem>.jpg`，卡片里用相对路径引用。

use crate::analyzer::ImageData;
use crate::display::{render_card, EmphasisMode};
use crate::error::{ChefMentorError, Result};
use chef_mentor_common::HistoryRecord;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

pub fn write_card(record: &HistoryRecord, path: &Path) -> Result<()> {
    super::ensure_parent(path)?;

    let mut content = render_card(record, EmphasisMode::Markdown);

    if let Some(data_url) = &record.user_input_image {
        let photo_path = photo_path_for(path);
        write_photo(data_url, &photo_path)?;
        let file_name = photo_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        content.push_str(&format!("\n![{}]({})\n", record.feedback.recipe_name, file_name));
    }

    content.push_str("\n---\nChefMentor · 让下厨像呼吸一样自然\n");

    std::fs::write(path, content)
        .map_err(|e| ChefMentorError::Export(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

fn photo_path_for(card_path: &Path) -> PathBuf {
    card_path.with_extension("jpg")
}

/// data URL 里的图片另存为 JPEG
fn write_photo(data_url: &str, path: &Path) -> Result<()> {
    let photo = ImageData::from_data_url(data_url)
        .ok_or_else(|| ChefMentorError::Export("图片数据格式不正确".to_string()))?;
    let bytes = photo
        .decode_bytes()
        .map_err(|e| ChefMentorError::Export(e.to_string()))?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| ChefMentorError::Export(format!("图片解码失败: {}", e)))?;
    DynamicImage::ImageRgb8(decoded.to_rgb8())
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| ChefMentorError::Export(format!("{}: {}", path.display(), e)))?;
    Ok(())
}
