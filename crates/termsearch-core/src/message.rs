//! Output produced by the interpreter
//!
//! The interpreter never renders. Each line it produces is a [`Message`]
//! tagged with what it means; the host decides how each kind looks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    /// Missing or malformed arguments
    Usage,
    /// A collaborator reported a failure
    Error,
    /// A requested change was made
    Confirmation,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Usage => "usage",
            MessageKind::Error => "error",
            MessageKind::Confirmation => "confirmation",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    /// `text` is an HTML fragment whose interpolated values are escaped
    pub html: bool,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            html: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Info, text)
    }

    pub fn usage(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Usage, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    pub fn confirmation(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Confirmation, text)
    }

    /// Pre-sanitized HTML fragment; build `text` with [`escape_html`].
    pub fn html(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            html: true,
        }
    }
}

/// Changes only the host can make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Effect {
    /// Scale the output log font to this percentage
    SetFontScale(u16),
    /// Remove every rendered line from the output log
    ClearLog,
}

/// Receives messages in the order they are produced.
pub trait OutputSink: Send + Sync {
    fn emit(&self, message: &Message);
}

/// Sink that drops everything; callers read [`crate::Dispatch`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&self, _message: &Message) {}
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<a href="url">label</a>` with both parts escaped.
pub fn link(url: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        escape_html(url),
        escape_html(label)
    )
}
