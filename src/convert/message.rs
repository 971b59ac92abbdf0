//! Messages reported by layout conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a conversion message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    General,

    /// An attribute value was rewritten
    ValueChanged,

    /// Content was dropped because the target format cannot hold it
    ContentRemoved,

    /// An object changed its type
    TypeChanged,
}

/// A human-readable note about one change made (or needed) by a converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl ConversionMessage {
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn general(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::General)
    }
}

impl fmt::Display for ConversionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
