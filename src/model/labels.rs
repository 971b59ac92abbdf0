//! Semantic labels attached to content objects.

use serde::{Deserialize, Serialize};

/// A set of labels referring to an external model (e.g. an ontology).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    /// External model the labels refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_model: Option<String>,

    /// Id of the labelled object in the external model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Prefix for all label values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// The labels
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the external model.
    pub fn with_external_model(mut self, model: impl Into<String>) -> Self {
        self.external_model = Some(model.into());
        self
    }

    /// Append a label.
    pub fn add(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Find the first label with the given value.
    pub fn find(&self, value: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.value == value)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A single label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub label_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Set the label type.
    pub fn with_type(mut self, label_type: impl Into<String>) -> Self {
        self.label_type = Some(label_type.into());
        self
    }
}
