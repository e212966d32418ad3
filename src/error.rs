use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChefMentorError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("未设置API密钥。请用 `chef-mentor config --set-api-key YOUR_KEY` 设置，或设置环境变量 GEMINI_API_KEY")]
    MissingApiKey,

    #[error("请输入菜谱文字或附上一张照片")]
    MissingInput,

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("图片读取错误: {0}")]
    ImageLoad(String),

    #[error("API调用错误: {0}")]
    ApiCall(String),

    #[error("API响应解析失败: {0}")]
    ApiParse(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("找不到记录: {0}")]
    RecordNotFound(String),

    #[error("导出错误: {0}")]
    Export(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl ChefMentorError {
    /// 远程调用失败、无响应、响应格式不符
    pub fn is_service_error(&self) -> bool {
        matches!(self, ChefMentorError::ApiCall(_) | ChefMentorError::ApiParse(_))
    }
}

impl From<chef_mentor_common::Error> for ChefMentorError {
    fn from(err: chef_mentor_common::Error) -> Self {
        match err {
            chef_mentor_common::Error::Parse(msg) => ChefMentorError::ApiParse(msg),
            chef_mentor_common::Error::Config(msg) => ChefMentorError::Config(msg),
            chef_mentor_common::Error::Json(e) => ChefMentorError::JsonParse(e),
            chef_mentor_common::Error::Io(e) => ChefMentorError::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChefMentorError>;
