//! ChefMentor Common Library
//!
//! CLI 与存储层共享的类型和工具，不做任何 I/O

pub mod types;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod emphasis;
pub mod history;

pub use types::{AnalysisStatus, Category, CategoryFilter, HistoryRecord, RecipeFeedback};
pub use error::{Error, Result};
pub use prompts::{build_system_instruction, response_schema, user_prompt, PromptStyle};
pub use parser::{extract_json_object, parse_feedback_response};
pub use emphasis::{parse_emphasis, render_ansi, strip_emphasis, Segment};
pub use history::HistoryList;
