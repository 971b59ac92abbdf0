//! Text content variants of text-bearing objects.

use serde::{Deserialize, Serialize};

/// One text content variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Unicode text
    #[serde(default)]
    pub text: String,

    /// Plain-text rendering, if it differs from `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,

    /// Recognition confidence (0..1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Data type of the text (e.g. `date`, `number`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_details: Option<String>,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Ordered text variants. The first one is the primary text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextContentVariants {
    variants: Vec<TextContent>,
}

impl TextContentVariants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary text, or `None` if no variant exists.
    pub fn text(&self) -> Option<&str> {
        self.variants.first().map(|v| v.text.as_str())
    }

    /// Replace the primary text, creating the primary variant if needed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        match self.variants.first_mut() {
            Some(primary) => primary.text = text.into(),
            None => self.variants.push(TextContent::new(text)),
        }
    }

    /// Append an alternative variant.
    pub fn add(&mut self, variant: TextContent) {
        self.variants.push(variant);
    }

    pub fn get(&self, index: usize) -> Option<&TextContent> {
        self.variants.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TextContent> {
        self.variants.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<TextContent> {
        (index < self.variants.len()).then(|| self.variants.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextContent> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
