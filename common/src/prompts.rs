//! 提示词生成模块
//!
//! - SYSTEM_INSTRUCTION: 新手烹饪教练人设
//! - EMPHASIS_INSTRUCTION: 要求用 `**` 标出关键短语的附加要求
//! - response_schema: 远程模型必须遵守的 JSON Schema

use serde_json::json;

/// 人设与反馈维度
pub const SYSTEM_INSTRUCTION: &str = r#"你是一位超级温暖、有耐心的私人烹饪教练，专门指导完全没有下厨经验的新手。
你的目标是让用户觉得“我也能行”，并且通过你的建议真正提升食物口感。

**语言准则：**
1. 语气：像对待朋友一样亲切，多用“咱们”、“建议你”、“别怕”等词汇。
2. 解释：遇到专业术语（如：焯水、勾芡、爆香）一定要用大白话解释它的操作方法和目的。
3. 容错性：给新手一些容错方案（例如：如果火开大了，可以赶紧关火降温）。
4. 鼓励：在结尾给出一句非常具体且走心的鼓励。

**反馈维度要求：**
- 注意事项：重点提醒“防烫”、“防油溅”、“提前备菜”等实操细节。
- 口感关键：告诉他们如何判断熟没熟，以及保持嫩滑、脆爽的小窍门。
- 风味巧思：推荐一两种超市就能买到的常用增味神器（如：蚝油、蒸鱼豉油）。
- 摆盘艺术：教他们用最简单的白色盘子和家里现有的餐具拍出大片感。"#;

/// 重点标注要求（强调版提示词）
pub const EMPHASIS_INSTRUCTION: &str = r#"**重点标注：**
- 每条建议里的关键操作短语、食材用量、时间和火候/温度数值，都用 **双星号** 包起来（例如：**大火蒸8分钟**、**盐3克**）。
- 只包关键词，不要整句加粗。"#;

/// 用户没写文字时的默认提问
pub const DEFAULT_USER_PROMPT: &str = "帮我分析一下这个菜谱，我是个厨房小白，请讲得通俗易懂一些。";

/// 提示词版本
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// 纯文本输出
    Plain,
    /// 关键短语用 `**` 标出
    #[default]
    Emphasized,
}

/// 生成系统指令
pub fn build_system_instruction(style: PromptStyle) -> String {
    match style {
        PromptStyle::Plain => SYSTEM_INSTRUCTION.to_string(),
        PromptStyle::Emphasized => format!("{}\n\n{}", SYSTEM_INSTRUCTION, EMPHASIS_INSTRUCTION),
    }
}

/// 用户消息正文，空白输入换成默认提问
pub fn user_prompt(text: &str) -> &str {
    if text.trim().is_empty() {
        DEFAULT_USER_PROMPT
    } else {
        text
    }
}

/// RecipeFeedback 对应的响应 Schema
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING", "description": "菜名" },
            "precautions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "注意事项列表，用新手能听懂的话写"
            },
            "textureSecrets": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "让口感更好的关键点（包含原理解释）"
            },
            "flavorEnhancements": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "简单的提鲜小妙招"
            },
            "platingTechniques": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "小白也能做到的美观摆盘法"
            },
            "encouragement": { "type": "STRING", "description": "超级暖心的鼓励语" }
        },
        "required": [
            "recipeName",
            "precautions",
            "textureSecrets",
            "flavorEnhancements",
            "platingTechniques",
            "encouragement"
        ]
    })
}
