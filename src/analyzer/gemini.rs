//! Gemini API 连接
//!
//! 一次 generateContent 调用：系统人设 + 用户文字 + 可选图片，
//! 要求模型按 response_schema 返回 JSON。不重试。

use super::{RecipeAnalyzer, RecipeInput};
use crate::config::Config;
use crate::error::{ChefMentorError, Result};
use chef_mentor_common::{
    build_system_instruction, parse_feedback_response, response_schema, user_prompt, PromptStyle,
    RecipeFeedback,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// Gemini API响应
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// 第一个候选的文本拼接；没有内容时返回 None
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    prompt_style: PromptStyle,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChefMentorError::ApiCall(format!("HTTP客户端初始化失败: {}", e)))?;

        Ok(Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            prompt_style: PromptStyle::default(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(
            config.get_api_key()?,
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(client.with_prompt_style(config.prompt_style()))
    }

    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self
    }

    /// 测试或代理用的接口地址
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, input: &RecipeInput) -> GeminiRequest {
        let mut parts = vec![Part::Text {
            text: user_prompt(&input.text).to_string(),
        }];

        if let Some(image) = &input.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.base64.clone(),
                },
            });
        }

        GeminiRequest {
            system_instruction: Content {
                parts: vec![Part::Text {
                    text: build_system_instruction(self.prompt_style),
                }],
            },
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }

    async fn call_gemini_api(&self, request: &GeminiRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                ChefMentorError::ApiCall(format!("请求失败: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Gemini response: {}", e);
            ChefMentorError::ApiCall(format!("读取响应失败: {}", e))
        })?;

        read_response(status, &body)
    }
}

/// HTTP 状态和响应正文 → 候选文本
fn read_response(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        tracing::error!("Gemini API error: {} - {}", status, body);
        return Err(ChefMentorError::ApiCall(format!("API返回错误: {}", status)));
    }

    let gemini_response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse Gemini response: {}", e);
        ChefMentorError::ApiParse(format!("响应不是合法JSON: {}", e))
    })?;

    gemini_response
        .text()
        .ok_or_else(|| ChefMentorError::ApiCall("模型没有返回内容".to_string()))
}

impl RecipeAnalyzer for GeminiClient {
    async fn analyze(&self, input: &RecipeInput) -> Result<RecipeFeedback> {
        let request = self.build_request(input);
        tracing::debug!(
            "calling {} (text: {} chars, image: {})",
            self.model,
            input.text.chars().count(),
            input.image.is_some()
        );

        let text = self.call_gemini_api(&request).await?;
        tracing::debug!("response length: {} chars", text.chars().count());

        Ok(parse_feedback_response(&text)?)
    }
}
