//! Content objects: regions, low-level text objects and grapheme elements.
//!
//! Objects live in the arena of their [`PageLayout`](super::PageLayout) and
//! refer to parents and children by [`Id`]. Fields shared by every kind are
//! kept in [`ObjectCore`].

use super::content_type::{ContentType, GraphemeType, LowLevelTextType, RegionType, RoleType};
use super::geometry::Polygon;
use super::labels::Labels;
use super::text::TextContentVariants;
use crate::attr::VariableMap;
use crate::ident::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State common to all content objects.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCore {
    id: Id,

    /// Outline; absent for non-printing characters and grapheme groups
    pub coords: Option<Polygon>,

    pub(crate) attributes: VariableMap,

    pub labels: Option<Labels>,

    /// Free-form attributes outside the format's templates
    pub user_attributes: Option<VariableMap>,

    pub(crate) parent: Option<Id>,
}

/// Type name of user-defined attribute maps. No format model has a template
/// for it, so reconciliation leaves these maps alone.
pub const USER_ATTRIBUTES_TYPE_NAME: &str = "UserDefined";

impl ObjectCore {
    pub(crate) fn new(id: Id, attributes: VariableMap, parent: Option<Id>) -> Self {
        Self {
            id,
            coords: None,
            attributes,
            labels: None,
            user_attributes: None,
            parent,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    pub fn attributes(&self) -> &VariableMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut VariableMap {
        &mut self.attributes
    }

    pub fn parent(&self) -> Option<&Id> {
        self.parent.as_ref()
    }

    /// User-defined attributes, created empty on first use.
    pub fn user_attributes_mut(&mut self) -> &mut VariableMap {
        self.user_attributes
            .get_or_insert_with(|| VariableMap::new(USER_ATTRIBUTES_TYPE_NAME))
    }
}

/// Reference to an alternative image of a region (e.g. a binarised version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeImage {
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AlternativeImage {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            comments: None,
            confidence: None,
        }
    }
}

/// A role a region plays (e.g. table cell), with its own attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRole {
    role_type: RoleType,
    pub(crate) attributes: VariableMap,
}

impl RegionRole {
    pub(crate) fn new(role_type: RoleType, attributes: VariableMap) -> Self {
        Self {
            role_type,
            attributes,
        }
    }

    pub fn role_type(&self) -> RoleType {
        self.role_type
    }

    pub fn attributes(&self) -> &VariableMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut VariableMap {
        &mut self.attributes
    }
}

/// Text part of a text region: its text variants and its text lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextContainer {
    pub variants: TextContentVariants,
    pub(crate) lines: Vec<Id>,
}

impl TextContainer {
    pub fn lines(&self) -> &[Id] {
        &self.lines
    }
}

/// A layout region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub(crate) core: ObjectCore,
    pub(crate) region_type: RegionType,
    pub(crate) regions: Vec<Id>,
    pub(crate) roles: BTreeMap<RoleType, RegionRole>,
    pub alternative_images: Vec<AlternativeImage>,
    pub(crate) text: Option<TextContainer>,
}

impl Region {
    pub(crate) fn new(core: ObjectCore, region_type: RegionType) -> Self {
        let text = region_type.is_text().then(TextContainer::default);
        Self {
            core,
            region_type,
            regions: Vec::new(),
            roles: BTreeMap::new(),
            alternative_images: Vec::new(),
            text,
        }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    pub fn id(&self) -> &Id {
        self.core.id()
    }

    pub fn region_type(&self) -> &RegionType {
        &self.region_type
    }

    /// Nested child regions.
    pub fn regions(&self) -> &[Id] {
        &self.regions
    }

    /// Text lines, empty for non-text regions.
    pub fn text_lines(&self) -> &[Id] {
        self.text.as_ref().map(|t| t.lines()).unwrap_or(&[])
    }

    /// Text part of a text region.
    pub fn text(&self) -> Option<&TextContainer> {
        self.text.as_ref()
    }

    pub fn text_mut(&mut self) -> Option<&mut TextContainer> {
        self.text.as_mut()
    }

    pub fn role(&self, role_type: RoleType) -> Option<&RegionRole> {
        self.roles.get(&role_type)
    }

    pub fn role_mut(&mut self, role_type: RoleType) -> Option<&mut RegionRole> {
        self.roles.get_mut(&role_type)
    }

    /// Attach a role, replacing one of the same type.
    pub fn add_role(&mut self, role: RegionRole) -> Option<RegionRole> {
        self.roles.insert(role.role_type(), role)
    }

    pub fn remove_role(&mut self, role_type: RoleType) -> Option<RegionRole> {
        self.roles.remove(&role_type)
    }

    pub fn roles(&self) -> impl Iterator<Item = &RegionRole> {
        self.roles.values()
    }

    pub fn roles_mut(&mut self) -> impl Iterator<Item = &mut RegionRole> {
        self.roles.values_mut()
    }
}

/// A text line, word or glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub(crate) core: ObjectCore,
    pub(crate) kind: LowLevelTextType,
    pub variants: TextContentVariants,
    pub(crate) children: Vec<Id>,
}

impl TextObject {
    pub(crate) fn new(core: ObjectCore, kind: LowLevelTextType) -> Self {
        Self {
            core,
            kind,
            variants: TextContentVariants::new(),
            children: Vec::new(),
        }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    pub fn id(&self) -> &Id {
        self.core.id()
    }

    pub fn kind(&self) -> LowLevelTextType {
        self.kind
    }

    /// Words of a line, glyphs of a word or grapheme elements of a glyph.
    pub fn children(&self) -> &[Id] {
        &self.children
    }
}

/// Variant-specific part of a grapheme element.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphemeKind {
    Grapheme,
    NonPrintingCharacter,
    /// Group of graphemes and non-printing characters
    Group { members: Vec<Id> },
}

/// A grapheme, grapheme group or non-printing character inside a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphemeElement {
    pub(crate) core: ObjectCore,
    pub(crate) kind: GraphemeKind,
    pub variants: TextContentVariants,
}

impl GraphemeElement {
    pub(crate) fn new(core: ObjectCore, grapheme_type: GraphemeType) -> Self {
        let kind = match grapheme_type {
            GraphemeType::Grapheme => GraphemeKind::Grapheme,
            GraphemeType::NonPrintingCharacter => GraphemeKind::NonPrintingCharacter,
            GraphemeType::GraphemeGroup => GraphemeKind::Group {
                members: Vec::new(),
            },
        };
        Self {
            core,
            kind,
            variants: TextContentVariants::new(),
        }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    pub fn id(&self) -> &Id {
        self.core.id()
    }

    pub fn kind(&self) -> &GraphemeKind {
        &self.kind
    }

    pub fn grapheme_type(&self) -> GraphemeType {
        match self.kind {
            GraphemeKind::Grapheme => GraphemeType::Grapheme,
            GraphemeKind::NonPrintingCharacter => GraphemeType::NonPrintingCharacter,
            GraphemeKind::Group { .. } => GraphemeType::GraphemeGroup,
        }
    }

    /// Members of a group, empty otherwise.
    pub fn members(&self) -> &[Id] {
        match &self.kind {
            GraphemeKind::Group { members } => members,
            _ => &[],
        }
    }
}

/// Any content object.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentObject {
    Region(Region),
    Text(TextObject),
    Grapheme(GraphemeElement),
}

impl ContentObject {
    pub fn core(&self) -> &ObjectCore {
        match self {
            ContentObject::Region(r) => &r.core,
            ContentObject::Text(t) => &t.core,
            ContentObject::Grapheme(g) => &g.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut ObjectCore {
        match self {
            ContentObject::Region(r) => &mut r.core,
            ContentObject::Text(t) => &mut t.core,
            ContentObject::Grapheme(g) => &mut g.core,
        }
    }

    pub fn id(&self) -> &Id {
        self.core().id()
    }

    pub fn parent(&self) -> Option<&Id> {
        self.core().parent()
    }

    pub fn attributes(&self) -> &VariableMap {
        &self.core().attributes
    }

    pub fn attributes_mut(&mut self) -> &mut VariableMap {
        &mut self.core_mut().attributes
    }

    pub fn labels(&self) -> Option<&Labels> {
        self.core().labels.as_ref()
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentObject::Region(r) => ContentType::Region(r.region_type.clone()),
            ContentObject::Text(t) => ContentType::LowLevelText(t.kind),
            ContentObject::Grapheme(g) => ContentType::Grapheme(g.grapheme_type()),
        }
    }

    /// Text variants of text-bearing objects.
    pub fn text_variants(&self) -> Option<&TextContentVariants> {
        match self {
            ContentObject::Region(r) => r.text.as_ref().map(|t| &t.variants),
            ContentObject::Text(t) => Some(&t.variants),
            ContentObject::Grapheme(g) => Some(&g.variants),
        }
    }

    pub fn text_variants_mut(&mut self) -> Option<&mut TextContentVariants> {
        match self {
            ContentObject::Region(r) => r.text.as_mut().map(|t| &mut t.variants),
            ContentObject::Text(t) => Some(&mut t.variants),
            ContentObject::Grapheme(g) => Some(&mut g.variants),
        }
    }

    /// Primary text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text_variants().and_then(|v| v.text())
    }

    /// Direct children in document order: text lines before nested regions.
    pub fn children(&self) -> Vec<Id> {
        match self {
            ContentObject::Region(r) => r
                .text_lines()
                .iter()
                .chain(r.regions.iter())
                .cloned()
                .collect(),
            ContentObject::Text(t) => t.children.clone(),
            ContentObject::Grapheme(g) => g.members().to_vec(),
        }
    }

    pub fn as_region(&self) -> Option<&Region> {
        match self {
            ContentObject::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_region_mut(&mut self) -> Option<&mut Region> {
        match self {
            ContentObject::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text_object(&self) -> Option<&TextObject> {
        match self {
            ContentObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_object_mut(&mut self) -> Option<&mut TextObject> {
        match self {
            ContentObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_grapheme(&self) -> Option<&GraphemeElement> {
        match self {
            ContentObject::Grapheme(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grapheme_mut(&mut self) -> Option<&mut GraphemeElement> {
        match self {
            ContentObject::Grapheme(g) => Some(g),
            _ => None,
        }
    }

    /// Replace a child id in place, keeping its position.
    pub(crate) fn replace_child(&mut self, old: &Id, new: &Id) -> bool {
        fn swap(list: &mut [Id], old: &Id, new: &Id) -> bool {
            match list.iter_mut().find(|c| *c == old) {
                Some(slot) => {
                    *slot = new.clone();
                    true
                }
                None => false,
            }
        }
        match self {
            ContentObject::Region(r) => {
                swap(&mut r.regions, old, new)
                    || r.text
                        .as_mut()
                        .is_some_and(|t| swap(&mut t.lines, old, new))
            }
            ContentObject::Text(t) => swap(&mut t.children, old, new),
            ContentObject::Grapheme(g) => match &mut g.kind {
                GraphemeKind::Group { members } => swap(members, old, new),
                _ => false,
            },
        }
    }

    /// Detach a child id from this object's child lists.
    pub(crate) fn unlink_child(&mut self, child: &Id) -> bool {
        fn drop_id(list: &mut Vec<Id>, id: &Id) -> bool {
            let before = list.len();
            list.retain(|c| c != id);
            list.len() != before
        }
        match self {
            ContentObject::Region(r) => {
                let in_regions = drop_id(&mut r.regions, child);
                let in_lines = r
                    .text
                    .as_mut()
                    .map(|t| drop_id(&mut t.lines, child))
                    .unwrap_or(false);
                in_regions || in_lines
            }
            ContentObject::Text(t) => drop_id(&mut t.children, child),
            ContentObject::Grapheme(g) => match &mut g.kind {
                GraphemeKind::Group { members } => drop_id(members, child),
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(id: &str, type_name: &str) -> ObjectCore {
        ObjectCore::new(Id::from(id), VariableMap::new(type_name), None)
    }

    #[test]
    fn test_only_text_regions_hold_text() {
        let text = Region::new(core("r1", "TextRegion"), RegionType::Text);
        let image = Region::new(core("r2", "ImageRegion"), RegionType::Image);
        assert!(text.text().is_some());
        assert!(image.text().is_none());
        assert!(ContentObject::Region(image).text_variants().is_none());
    }

    #[test]
    fn test_children_order() {
        let mut region = Region::new(core("r1", "TextRegion"), RegionType::Text);
        region.regions.push(Id::from("r2"));
        region.text.as_mut().unwrap().lines.push(Id::from("l1"));
        let obj = ContentObject::Region(region);
        assert_eq!(obj.children(), vec![Id::from("l1"), Id::from("r2")]);
    }

    #[test]
    fn test_unlink_child() {
        let mut group = GraphemeElement::new(core("b1", "GraphemeGroup"), GraphemeType::GraphemeGroup);
        if let GraphemeKind::Group { members } = &mut group.kind {
            members.push(Id::from("a1"));
        }
        let mut obj = ContentObject::Grapheme(group);
        assert!(obj.unlink_child(&Id::from("a1")));
        assert!(!obj.unlink_child(&Id::from("a1")));
        assert!(obj.children().is_empty());
    }

    #[test]
    fn test_replace_child_keeps_position() {
        let mut region = Region::new(core("r1", "TextRegion"), RegionType::Text);
        region.regions.extend([Id::from("r2"), Id::from("r3")]);
        region.text.as_mut().unwrap().lines.push(Id::from("l1"));
        let mut obj = ContentObject::Region(region);

        assert!(obj.replace_child(&Id::from("r2"), &Id::from("intro")));
        assert!(obj.replace_child(&Id::from("l1"), &Id::from("first")));
        assert!(!obj.replace_child(&Id::from("r9"), &Id::from("x")));
        assert_eq!(
            obj.children(),
            vec![Id::from("first"), Id::from("intro"), Id::from("r3")]
        );
    }

    #[test]
    fn test_user_attributes_created_on_demand() {
        let mut c = core("r1", "TextRegion");
        assert!(c.user_attributes.is_none());
        c.user_attributes_mut()
            .insert(crate::attr::Variable::new("source", crate::attr::VariableType::String));
        let attrs = c.user_attributes.as_ref().unwrap();
        assert_eq!(attrs.type_name(), USER_ATTRIBUTES_TYPE_NAME);
        assert!(attrs.contains("source"));
    }

    #[test]
    fn test_roles_keyed_by_type() {
        let mut region = Region::new(core("r1", "TableRegion"), RegionType::Table);
        let role = RegionRole::new(RoleType::TableCell, VariableMap::new("TableCellRole"));
        assert!(region.add_role(role.clone()).is_none());
        assert!(region.add_role(role).is_some());
        assert_eq!(region.roles().count(), 1);
        assert!(region.remove_role(RoleType::TableCell).is_some());
    }
}
