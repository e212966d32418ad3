//! 重点标注（`**关键词**`）的解析与渲染
//!
//! 标注只是客户端的展示约定，模型不保证一定会加，
//! 所以没有标注、标注不成对的文本都要能原样显示。

use regex::Regex;

lazy_static::lazy_static! {
    static ref STRONG_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
}

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// 文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Strong(&'a str),
}

/// 把文本拆成普通片段和重点片段
///
/// 不成对的 `**` 保留在普通片段里
pub fn parse_emphasis(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in STRONG_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Plain(&text[last..whole.start()]));
        }
        segments.push(Segment::Strong(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }

    segments
}

/// 去掉标注，只留文字
pub fn strip_emphasis(text: &str) -> String {
    STRONG_RE.replace_all(text, "$1").into_owned()
}

/// 终端显示用：重点片段加粗
pub fn render_ansi(text: &str) -> String {
    parse_emphasis(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(s) => s.to_string(),
            Segment::Strong(s) => format!("{}{}{}", ANSI_BOLD, s, ANSI_RESET),
        })
        .collect()
}
