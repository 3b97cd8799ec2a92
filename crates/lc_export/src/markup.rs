//! Line-oriented reading of the article markup the models produce.
//!
//! Only a handful of constructs are recognised: `#`, `##` and `###`
//! headings, `• `/`- `/`* ` list items, `**bold**` runs and blank lines.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Blank,
    Heading { level: u8, spans: Vec<Span> },
    ListItem(Vec<Span>),
    Paragraph(Vec<Span>),
}

fn bold_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"))
}

/// Split inline text into plain and bold runs.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;
    for captures in bold_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }
        spans.push(Span::bold(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }
    spans
}

pub fn parse_line(line: &str) -> Block {
    let line = line.trim();
    if line.is_empty() {
        return Block::Blank;
    }

    for (prefix, level) in [("# ", 1), ("## ", 2), ("### ", 3)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Block::Heading {
                level,
                spans: parse_spans(rest),
            };
        }
    }

    for prefix in ["• ", "- ", "* "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Block::ListItem(parse_spans(rest));
        }
    }

    Block::Paragraph(parse_spans(line))
}

pub fn parse(text: &str) -> Vec<Block> {
    text.split('\n').map(parse_line).collect()
}
