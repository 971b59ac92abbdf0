//! Page metadata.

use super::Labels;
use crate::attr::VariableMap;
use chrono::{DateTime, Utc};

/// Metadata of a page: provenance plus free-form items.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Creator (person or application)
    pub creator: String,

    /// Creation time
    pub created: DateTime<Utc>,

    /// Last modification time
    pub last_change: DateTime<Utc>,

    pub comments: Option<String>,

    /// Reference to external metadata
    pub external_ref: Option<String>,

    items: Vec<MetadataItem>,
}

impl Metadata {
    /// Create metadata stamped with the current time.
    pub fn new(creator: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            creator: creator.into(),
            created: now,
            last_change: now,
            comments: None,
            external_ref: None,
            items: Vec::new(),
        }
    }

    /// Update the last-change timestamp.
    pub fn touch(&mut self) {
        self.last_change = Utc::now();
    }

    pub fn items(&self) -> &[MetadataItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [MetadataItem] {
        &mut self.items
    }

    /// Append an item created by the page's content factory.
    pub fn add_item(&mut self, item: MetadataItem) {
        self.items.push(item);
    }

    /// Remove all items, returning how many there were.
    pub fn clear_items(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("")
    }
}

/// A typed metadata entry (`type`, `name`, `value`, `date` attributes).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataItem {
    pub(crate) attributes: VariableMap,
    pub labels: Option<Labels>,
}

impl MetadataItem {
    pub(crate) fn new(attributes: VariableMap) -> Self {
        Self {
            attributes,
            labels: None,
        }
    }

    pub fn attributes(&self) -> &VariableMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut VariableMap {
        &mut self.attributes
    }

    /// Value of the `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.attributes.str_value("name")
    }

    /// Value of the `value` attribute.
    pub fn value(&self) -> Option<&str> {
        self.attributes.str_value("value")
    }
}
