//! API响应解析
//!
//! 从模型返回的文本中取出 JSON 对象，并解析成 RecipeFeedback

use crate::error::{Error, Result};
use crate::types::RecipeFeedback;

/// 从响应文本中提取 JSON 对象
///
/// 提取优先级:
/// 1. ```json ... ``` 代码块
/// 2. 第一个 `{` 到最后一个 `}`
/// 3. 错误
///
/// # Examples
/// ```
/// use chef_mentor_common::extract_json_object;
///
/// let response = "好的：{\"recipeName\": \"番茄炒蛋\"}";
/// let json = extract_json_object(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("找不到JSON对象".into()))
}

/// 解析点评响应
///
/// 空响应、找不到 JSON、字段缺失或类型不符都返回 `Error::Parse`
pub fn parse_feedback_response(response: &str) -> Result<RecipeFeedback> {
    if response.trim().is_empty() {
        return Err(Error::Parse("模型没有返回内容".into()));
    }

    let json_str = extract_json_object(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("点评 JSON 解析错误: {}", e)))
}
