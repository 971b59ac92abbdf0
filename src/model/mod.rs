//! Page content model.
//!
//! A [`Page`] owns a [`PageLayout`], which holds every content object in an
//! arena keyed by [`Id`](crate::Id): regions, text lines, words, glyphs and
//! grapheme elements. Objects are created through the layout's
//! [`ContentFactory`], which binds them to the page's id registry and to the
//! attribute templates of the page's format version.

mod content_type;
mod factory;
mod geometry;
mod labels;
mod layout;
mod metadata;
mod object;
mod page;
mod reading_order;
mod relations;
mod stats;
mod text;
mod visit;

pub use content_type::{ContentType, GraphemeType, LowLevelTextType, RegionType, RoleType};
pub use factory::{ContentFactory, PAGE_TYPE_NAME};
pub use geometry::{Point, Polygon};
pub use labels::{Label, Labels};
pub use layout::PageLayout;
pub use metadata::{Metadata, MetadataItem};
pub use object::{
    AlternativeImage, ContentObject, GraphemeElement, GraphemeKind, ObjectCore, Region,
    RegionRole, TextContainer, TextObject, USER_ATTRIBUTES_TYPE_NAME,
};
pub use page::Page;
pub use reading_order::{Group, GroupMember, Layer, Layers, ReadingOrder};
pub use relations::{ContentObjectRelation, Relations, RelationType};
pub use stats::LayoutStats;
pub use text::{TextContent, TextContentVariants};
pub use visit::{walk, walk_from, ContentVisitor, VisitorAction};
