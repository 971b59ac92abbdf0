//! The content factory: the only place content objects are instantiated.

use super::content_type::{ContentType, RoleType};
use super::metadata::MetadataItem;
use super::object::{ContentObject, GraphemeElement, ObjectCore, Region, RegionRole, TextObject};
use super::reading_order::{Group, Layer, Layers, ReadingOrder};
use super::relations::{ContentObjectRelation, RelationType};
use crate::attr::{AttributeFactory, VariableMap};
use crate::error::{Error, Result};
use crate::ident::{prefix, Id, IdRegister};
use std::sync::Arc;

/// Type name of the page-level attribute template.
pub const PAGE_TYPE_NAME: &str = "Page";

/// Creates content objects bound to one page's id registry and to the
/// attribute templates of the page's format version.
#[derive(Debug, Clone)]
pub struct ContentFactory {
    ids: IdRegister,
    attributes: Arc<dyn AttributeFactory>,
}

impl ContentFactory {
    /// Create a factory with a fresh id registry.
    pub fn new(attributes: Arc<dyn AttributeFactory>) -> Self {
        Self {
            ids: IdRegister::new(),
            attributes,
        }
    }

    /// Create an object of the given type with a generated id.
    ///
    /// The object knows its parent, but is not yet linked into any layout.
    pub fn create(&mut self, content_type: &ContentType, parent: Option<&Id>) -> Result<ContentObject> {
        Self::check_creatable(content_type)?;
        let id = self.ids.generate(content_type.id_prefix())?;
        self.build(content_type, parent, id)
    }

    /// Like [`ContentFactory::create`], but claims an externally given id.
    pub fn create_with_id(
        &mut self,
        content_type: &ContentType,
        parent: Option<&Id>,
        id: &str,
    ) -> Result<ContentObject> {
        Self::check_creatable(content_type)?;
        let id = self.ids.register(id)?;
        self.build(content_type, parent, id)
    }

    fn check_creatable(content_type: &ContentType) -> Result<()> {
        match content_type {
            ContentType::MetadataItem => Err(not_layout_object(content_type)),
            _ => Ok(()),
        }
    }

    fn build(&self, content_type: &ContentType, parent: Option<&Id>, id: Id) -> Result<ContentObject> {
        let attributes = self.attributes.create_attributes(content_type.name());
        let core = ObjectCore::new(id, attributes, parent.cloned());
        Ok(match content_type {
            ContentType::Region(t) => ContentObject::Region(Region::new(core, t.clone())),
            ContentType::LowLevelText(t) => ContentObject::Text(TextObject::new(core, *t)),
            ContentType::Grapheme(t) => ContentObject::Grapheme(GraphemeElement::new(core, *t)),
            ContentType::MetadataItem => return Err(not_layout_object(content_type)),
        })
    }

    /// Create a region role, or `None` if the format version has no such role.
    pub fn create_region_role(&self, role_type: RoleType) -> Option<RegionRole> {
        if !self.attributes.knows_type(role_type.name()) {
            return None;
        }
        let attributes = self.attributes.create_attributes(role_type.name());
        Some(RegionRole::new(role_type, attributes))
    }

    /// Create an empty reading order with an ordered root group.
    pub fn create_reading_order(&mut self) -> Result<ReadingOrder> {
        Ok(ReadingOrder::new(self.create_group(true)?))
    }

    /// Create a reading-order group.
    pub fn create_group(&mut self, ordered: bool) -> Result<Group> {
        Ok(Group::new(self.ids.generate(prefix::GROUP)?, ordered))
    }

    /// Create an empty layer list.
    pub fn create_layers(&self) -> Layers {
        Layers::new()
    }

    /// Create a layer.
    pub fn create_layer(&mut self, z_index: i32) -> Result<Layer> {
        Ok(Layer::new(self.ids.generate(prefix::LAYER)?, z_index))
    }

    /// Create a relation between two objects.
    pub fn create_relation(
        &mut self,
        object1: &Id,
        object2: &Id,
        relation_type: RelationType,
    ) -> Result<ContentObjectRelation> {
        let id = self.ids.generate(prefix::RELATION)?;
        Ok(ContentObjectRelation::new(
            id,
            object1.clone(),
            object2.clone(),
            relation_type,
        ))
    }

    /// Create a metadata item.
    pub fn create_metadata_item(&self) -> MetadataItem {
        MetadataItem::new(self.attributes.create_attributes("MetadataItem"))
    }

    /// Create the page-level attributes.
    pub fn create_page_attributes(&self) -> VariableMap {
        self.attributes.create_attributes(PAGE_TYPE_NAME)
    }

    /// Claim an id.
    pub fn register_new_id(&mut self, id: &str) -> Result<Id> {
        self.ids.register(id)
    }

    pub fn id_register(&self) -> &IdRegister {
        &self.ids
    }

    pub fn id_register_mut(&mut self) -> &mut IdRegister {
        &mut self.ids
    }

    pub fn attribute_factory(&self) -> &Arc<dyn AttributeFactory> {
        &self.attributes
    }

    /// Switch to the templates of another format version.
    pub fn set_attribute_factory(&mut self, attributes: Arc<dyn AttributeFactory>) {
        self.attributes = attributes;
    }
}

fn not_layout_object(content_type: &ContentType) -> Error {
    Error::UnknownContentType(format!("{} is not a layout object", content_type))
}
