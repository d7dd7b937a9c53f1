use crate::error::Error;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Characters that must be escaped anywhere in MarkdownV2 text
static MARKDOWN_V2_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_*\[\]()~`>#+\-=|{}.!\\]").expect("valid regex"));

/// Characters that must be escaped in legacy Markdown text
static MARKDOWN_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_*`\[]").expect("valid regex"));

/// Text formatting mode understood by the Bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    MarkdownV2,
    Markdown,
    Html,
}

impl ParseMode {
    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::MarkdownV2 => "MarkdownV2",
            ParseMode::Markdown => "Markdown",
            ParseMode::Html => "HTML",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "MarkdownV2" => Ok(ParseMode::MarkdownV2),
            "Markdown" => Ok(ParseMode::Markdown),
            "HTML" | "Html" | "html" => Ok(ParseMode::Html),
            other => Err(Error::configuration(format!(
                "Invalid parse mode: '{}'. Must be 'MarkdownV2', 'Markdown' or 'HTML'",
                other
            ))),
        }
    }
}

/// Escaping helpers for embedding plain text in formatted messages
pub struct Formatter;

impl Formatter {
    /// Escape `text` so it renders literally under `mode`
    pub fn escape(text: &str, mode: ParseMode) -> String {
        let escaped = match mode {
            ParseMode::MarkdownV2 => Self::escape_markdown_v2(text),
            ParseMode::Markdown => Self::escape_markdown(text),
            ParseMode::Html => Self::escape_html(text),
        };
        trace!("Escaped for {}: {}", mode, escaped);
        escaped
    }

    /// Escape every MarkdownV2 special character with a backslash
    pub fn escape_markdown_v2(text: &str) -> String {
        MARKDOWN_V2_SPECIAL.replace_all(text, r"\$0").into_owned()
    }

    /// Escape legacy Markdown entities
    pub fn escape_markdown(text: &str) -> String {
        MARKDOWN_SPECIAL.replace_all(text, r"\$0").into_owned()
    }

    /// Escape HTML special characters
    pub fn escape_html(text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '&' => result.push_str("&amp;"),
                '"' => result.push_str("&quot;"),
                _ => result.push(c),
            }
        }
        result
    }
}
