mod gemini;
pub mod photo;

pub use gemini::{GeminiClient, GEMINI_API_BASE};
pub use photo::{load_image, ImageData};

use crate::error::{ChefMentorError, Result};
use chef_mentor_common::RecipeFeedback;
use std::future::Future;

/// 一次点评请求的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInput {
    pub text: String,
    pub image: Option<ImageData>,
}

impl RecipeInput {
    /// 文字为空且没有图片时返回 MissingInput
    ///
    /// 只有空白的文字也算有输入，发送时换成默认提问
    pub fn new(text: impl Into<String>, image: Option<ImageData>) -> Result<Self> {
        let text = text.into();
        if !Self::is_submittable(&text, image.is_some()) {
            return Err(ChefMentorError::MissingInput);
        }
        Ok(Self { text, image })
    }

    pub fn is_submittable(text: &str, has_image: bool) -> bool {
        has_image || !text.is_empty()
    }
}

/// 把菜谱交给远程模型点评
///
/// 实现方只负责一次调用，不碰历史记录，也不重试
pub trait RecipeAnalyzer {
    fn analyze(
        &self,
        input: &RecipeInput,
    ) -> impl Future<Output = Result<RecipeFeedback>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_requires_text_or_image() {
        assert!(matches!(
            RecipeInput::new("", None),
            Err(ChefMentorError::MissingInput)
        ));
        assert!(RecipeInput::new("  \n\t", None).is_ok());
        assert!(RecipeInput::new("番茄炒蛋", None).is_ok());
        assert!(RecipeInput::new("", Some(ImageData::jpeg(&[0]))).is_ok());
    }
}
