//! Visitor pattern for walking a page layout.
//!
//! The walk is depth first in document order: a region, its text lines (with
//! words, glyphs and grapheme elements), then its nested regions.
//!
//! # Example
//!
//! ```
//! use pagemodel::model::{ContentVisitor, PageLayout, Region, VisitorAction};
//!
//! struct RegionCounter(usize);
//!
//! impl ContentVisitor for RegionCounter {
//!     fn visit_region(&mut self, _region: &Region, _depth: usize) -> VisitorAction {
//!         self.0 += 1;
//!         VisitorAction::Continue
//!     }
//! }
//!
//! fn count(layout: &PageLayout) -> usize {
//!     let mut counter = RegionCounter(0);
//!     pagemodel::model::walk(layout, &mut counter);
//!     counter.0
//! }
//! ```

use super::layout::PageLayout;
use super::object::{ContentObject, GraphemeElement, Region, TextObject};
use crate::ident::Id;

/// Action returned by visitor methods to steer the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Descend into the children.
    #[default]
    Continue,

    /// Do not visit the children of this object.
    SkipChildren,

    /// End the walk.
    Stop,
}

impl VisitorAction {
    /// Check if this action ends the walk.
    pub fn should_stop(&self) -> bool {
        matches!(self, VisitorAction::Stop)
    }
}

/// Callbacks for the objects of a layout.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait ContentVisitor {
    /// Called for every region, nested ones included.
    fn visit_region(&mut self, region: &Region, depth: usize) -> VisitorAction {
        let _ = (region, depth);
        VisitorAction::Continue
    }

    /// Called for text lines, words and glyphs.
    fn visit_text_object(&mut self, object: &TextObject, depth: usize) -> VisitorAction {
        let _ = (object, depth);
        VisitorAction::Continue
    }

    /// Called for graphemes, grapheme groups and non-printing characters.
    fn visit_grapheme(&mut self, element: &GraphemeElement, depth: usize) -> VisitorAction {
        let _ = (element, depth);
        VisitorAction::Continue
    }
}

/// Walk all objects of a layout. Returns false if the visitor stopped early.
pub fn walk(layout: &PageLayout, visitor: &mut dyn ContentVisitor) -> bool {
    layout
        .regions()
        .iter()
        .all(|id| walk_object(layout, id, 0, visitor))
}

/// Walk the subtree rooted at `id`.
pub fn walk_from(layout: &PageLayout, id: &Id, visitor: &mut dyn ContentVisitor) -> bool {
    walk_object(layout, id, 0, visitor)
}

fn walk_object(
    layout: &PageLayout,
    id: &Id,
    depth: usize,
    visitor: &mut dyn ContentVisitor,
) -> bool {
    let Some(object) = layout.get(id) else {
        return true;
    };
    let action = match object {
        ContentObject::Region(r) => visitor.visit_region(r, depth),
        ContentObject::Text(t) => visitor.visit_text_object(t, depth),
        ContentObject::Grapheme(g) => visitor.visit_grapheme(g, depth),
    };
    match action {
        VisitorAction::Stop => false,
        VisitorAction::SkipChildren => true,
        VisitorAction::Continue => object
            .children()
            .iter()
            .all(|child| walk_object(layout, child, depth + 1, visitor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::FormatModel;
    use crate::model::{ContentType, RegionType};
    use crate::version::FormatVersion;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, usize)>,
        skip_lines: bool,
        stop_at: Option<String>,
    }

    impl ContentVisitor for Recorder {
        fn visit_region(&mut self, region: &Region, depth: usize) -> VisitorAction {
            self.seen.push((region.id().to_string(), depth));
            if self.stop_at.as_deref() == Some(region.id().as_str()) {
                return VisitorAction::Stop;
            }
            VisitorAction::Continue
        }

        fn visit_text_object(&mut self, object: &TextObject, depth: usize) -> VisitorAction {
            self.seen.push((object.id().to_string(), depth));
            if self.skip_lines {
                VisitorAction::SkipChildren
            } else {
                VisitorAction::Continue
            }
        }
    }

    fn layout() -> PageLayout {
        let model = FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap();
        let mut l = PageLayout::new(Arc::new(model));
        let r1 = l.create_region(RegionType::Text, None).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&r1)).unwrap();
        l.create(&ContentType::WORD, Some(&line)).unwrap();
        l.create_region(RegionType::Image, Some(&r1)).unwrap();
        l.create_region(RegionType::Separator, None).unwrap();
        l
    }

    #[test]
    fn test_walk_order_and_depth() {
        let l = layout();
        let mut rec = Recorder::default();
        assert!(walk(&l, &mut rec));
        let ids: Vec<(&str, usize)> = rec.seen.iter().map(|(s, d)| (s.as_str(), *d)).collect();
        assert_eq!(ids, vec![("r1", 0), ("l1", 1), ("w1", 2), ("r2", 1), ("r3", 0)]);
    }

    #[test]
    fn test_skip_children() {
        let l = layout();
        let mut rec = Recorder {
            skip_lines: true,
            ..Default::default()
        };
        walk(&l, &mut rec);
        assert!(!rec.seen.iter().any(|(id, _)| id == "w1"));
    }

    #[test]
    fn test_stop() {
        let l = layout();
        let mut rec = Recorder {
            stop_at: Some("r2".to_string()),
            ..Default::default()
        };
        assert!(!walk(&l, &mut rec));
        assert_eq!(rec.seen.last().map(|(id, _)| id.as_str()), Some("r2"));
    }
}
