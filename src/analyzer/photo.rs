//! 图片读取与 data URL 处理

use crate::error::{ChefMentorError, Result};
use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::Path;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";
const JPEG_QUALITY: u8 = 85;

/// 待发送的图片（base64 正文 + MIME 类型）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub base64: String,
}

impl ImageData {
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self {
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            base64: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// 从 "data:image/jpeg;base64,/9j/4AAQ..." 形式还原
    ///
    /// MIME 取不到时按 image/jpeg 处理；没有逗号分隔的正文时返回 None
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let (header, payload) = data_url.split_once(',')?;
        if payload.is_empty() {
            return None;
        }
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|s| s.split(';').next())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);

        Some(Self {
            mime_type: mime_type.to_string(),
            base64: payload.to_string(),
        })
    }

    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        general_purpose::STANDARD
            .decode(&self.base64)
            .map_err(|e| ChefMentorError::ImageLoad(format!("base64 解码失败: {}", e)))
    }
}

/// 读取图片，长边缩到 max_size 以内并转成 JPEG
pub fn load_image(path: &Path, max_size: u32) -> Result<ImageData> {
    if !path.exists() {
        return Err(ChefMentorError::FileNotFound(path.display().to_string()));
    }

    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| ChefMentorError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        "loaded image {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    let bytes = encode_jpeg(&downscale(img, max_size))?;
    Ok(ImageData::jpeg(&bytes))
}

fn downscale(img: DynamicImage, max_size: u32) -> DynamicImage {
    if max_size == 0 || (img.width() <= max_size && img.height() <= max_size) {
        return img;
    }
    img.resize(max_size, max_size, image::imageops::FilterType::Lanczos3)
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| ChefMentorError::ImageLoad(format!("JPEG 编码失败: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    #[test]
    fn test_from_data_url() {
        let data = ImageData::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(data.mime_type, "image/png");
        assert_eq!(data.base64, "iVBORw0KGgo=");
    }

    #[test]
    fn test_from_data_url_defaults_mime() {
        let data = ImageData::from_data_url("garbage,AAAA").unwrap();
        assert_eq!(data.mime_type, "image/jpeg");
        assert!(ImageData::from_data_url("no-comma").is_none());
        assert!(ImageData::from_data_url("data:image/jpeg;base64,").is_none());
    }

    #[test]
    fn test_data_url_round_trip() {
        let data = ImageData::jpeg(&[0xff, 0xd8, 0xff]);
        let url = data.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(ImageData::from_data_url(&url).unwrap(), data);
        assert_eq!(data.decode_bytes().unwrap(), vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_load_image_missing() {
        let result = load_image(Path::new("/nonexistent/dish.jpg"), 1568);
        assert!(matches!(result, Err(ChefMentorError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_downscales() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dish.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(400, 200, Rgb([200, 120, 40]));
        img.save(&path).unwrap();

        let data = load_image(&path, 100).unwrap();
        assert_eq!(data.mime_type, "image/jpeg");

        let decoded = image::load_from_memory(&data.decode_bytes().unwrap()).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
    }

    #[test]
    fn test_load_image_not_an_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.jpg");
        std::fs::write(&path, "这不是图片").unwrap();
        assert!(matches!(
            load_image(&path, 100),
            Err(ChefMentorError::ImageLoad(_))
        ));
    }
}
