use crate::error::{ChefMentorError, Result};
use chef_mentor_common::PromptStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    /// 让模型用 `**` 标出关键短语
    pub emphasize_key_phrases: bool,
    /// 历史记录目录（省略时用系统数据目录）
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-pro-preview".into(),
            max_image_size: 1568,
            timeout_seconds: 120,
            emphasize_key_phrases: true,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        tracing::debug!("config saved to {}", config_path.display());
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ChefMentorError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("chef-mentor").join("config.json"))
    }

    /// 历史记录所在目录
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ChefMentorError::Config("找不到数据目录".into()))?;
        Ok(base.join("chef-mentor"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 环境变量优先
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ChefMentorError::MissingApiKey)
    }

    pub fn prompt_style(&self) -> PromptStyle {
        if self.emphasize_key_phrases {
            PromptStyle::Emphasized
        } else {
            PromptStyle::Plain
        }
    }
}
