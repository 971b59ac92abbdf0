//! Layout statistics.

use super::layout::PageLayout;
use super::object::{GraphemeElement, Region, TextObject};
use super::visit::{walk, ContentVisitor, VisitorAction};
use super::LowLevelTextType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts collected from a page layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of regions, nested ones included
    pub region_count: u32,

    /// Regions per type name
    pub regions_by_type: BTreeMap<String, u32>,

    /// Number of text lines
    pub text_line_count: u32,

    /// Number of words
    pub word_count: u32,

    /// Number of glyphs
    pub glyph_count: u32,

    /// Number of graphemes, groups and non-printing characters
    pub grapheme_count: u32,

    /// Characters in the primary text of text regions (excluding whitespace)
    pub char_count: u32,

    /// Number of relations
    pub relation_count: u32,

    /// Number of region references in the reading order
    pub reading_order_refs: u32,

    /// Deepest region nesting level (0 = top level only)
    pub max_region_depth: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a layout.
    pub fn collect(layout: &PageLayout) -> Self {
        let mut stats = Self::new();
        walk(layout, &mut stats);
        stats.relation_count = layout.relations.len() as u32;
        stats.reading_order_refs = layout
            .reading_order
            .as_ref()
            .map(|o| o.region_ids().len() as u32)
            .unwrap_or(0);
        stats
    }

    /// Merge statistics from another page.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.region_count += other.region_count;
        for (name, n) in &other.regions_by_type {
            *self.regions_by_type.entry(name.clone()).or_insert(0) += n;
        }
        self.text_line_count += other.text_line_count;
        self.word_count += other.word_count;
        self.glyph_count += other.glyph_count;
        self.grapheme_count += other.grapheme_count;
        self.char_count += other.char_count;
        self.relation_count += other.relation_count;
        self.reading_order_refs += other.reading_order_refs;
        self.max_region_depth = self.max_region_depth.max(other.max_region_depth);
    }
}

impl ContentVisitor for LayoutStats {
    fn visit_region(&mut self, region: &Region, depth: usize) -> VisitorAction {
        self.region_count += 1;
        *self
            .regions_by_type
            .entry(region.region_type().name().to_string())
            .or_insert(0) += 1;
        if let Some(text) = region.text().and_then(|t| t.variants.text()) {
            self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        }
        self.max_region_depth = self.max_region_depth.max(depth as u32);
        VisitorAction::Continue
    }

    fn visit_text_object(&mut self, object: &TextObject, _depth: usize) -> VisitorAction {
        match object.kind() {
            LowLevelTextType::TextLine => self.text_line_count += 1,
            LowLevelTextType::Word => self.word_count += 1,
            LowLevelTextType::Glyph => self.glyph_count += 1,
        }
        VisitorAction::Continue
    }

    fn visit_grapheme(&mut self, _element: &GraphemeElement, _depth: usize) -> VisitorAction {
        self.grapheme_count += 1;
        VisitorAction::Continue
    }
}
