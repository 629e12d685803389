//! Structured notification messages and their plain-text rendering

use serde::{Deserialize, Serialize};

/// A notification to relay, such as a newly published security bulletin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Msg {
    pub title: String,

    #[serde(default)]
    pub link: String,

    /// Publication date as reported by the source, kept verbatim
    #[serde(default)]
    pub published: String,

    #[serde(default)]
    pub summary: String,
}

impl Msg {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Render a message as plain text, one non-empty field per line.
pub fn format_msg(msg: &Msg) -> String {
    let fields = [
        ("", msg.title.trim()),
        ("Summary: ", msg.summary.trim()),
        ("Published: ", msg.published.trim()),
        ("Link: ", msg.link.trim()),
    ];

    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
