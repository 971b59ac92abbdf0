//! JSON snapshots of pages.
//!
//! A snapshot stores the format version, the set attribute values of every
//! object, the object tree and the page-level structures. Loading rebuilds
//! the page through its content factory against the templates of the stored
//! version, so every id is registered again and duplicates are rejected.

use crate::attr::{AttributeFactory, ModelRegistry, Variable, VariableMap, VariableValue};
use crate::error::{Error, Result};
use crate::ident::Id;
use crate::model::{
    AlternativeImage, ContentObject, ContentObjectRelation, ContentType, Labels, Layers, Metadata,
    Page, PageLayout, Polygon, ReadingOrder, RoleType, TextContentVariants,
};
use crate::version::FormatVersion;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// JSON output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Set attribute values, in attribute order.
pub type AttributeValues = IndexMap<String, VariableValue>;

/// Serializable form of a [`Page`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<FormatVersion>,

    #[serde(default)]
    pub attributes: AttributeValues,

    pub metadata: MetadataSnapshot,

    #[serde(default)]
    pub regions: Vec<ObjectSnapshot>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<ContentObjectRelation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_order: Option<ReadingOrder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Layers>,
}

/// Serializable form of page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub creator: String,
    pub created: DateTime<Utc>,
    pub last_change: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MetadataItemSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataItemSnapshot {
    #[serde(default)]
    pub attributes: AttributeValues,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

/// Serializable form of a content object and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: Id,

    /// Content type name, e.g. `TextRegion` or `Glyph`
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Polygon>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: AttributeValues,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,

    /// Set user-defined attribute values
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub user_attributes: AttributeValues,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContentVariants>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_images: Vec<AlternativeImage>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub roles: IndexMap<String, AttributeValues>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectSnapshot>,
}

impl PageSnapshot {
    /// Capture a page.
    pub fn from_page(page: &Page) -> Self {
        let layout = page.layout();
        let metadata = page.metadata();
        Self {
            format_version: page.format_version().cloned(),
            attributes: values_of(layout.attributes()),
            metadata: MetadataSnapshot {
                creator: metadata.creator.clone(),
                created: metadata.created,
                last_change: metadata.last_change,
                comments: metadata.comments.clone(),
                external_ref: metadata.external_ref.clone(),
                items: metadata
                    .items()
                    .iter()
                    .map(|item| MetadataItemSnapshot {
                        attributes: values_of(item.attributes()),
                        labels: item.labels.clone(),
                    })
                    .collect(),
            },
            regions: layout
                .regions()
                .iter()
                .filter_map(|id| ObjectSnapshot::capture(layout, id))
                .collect(),
            relations: layout.relations.iter().cloned().collect(),
            reading_order: layout.reading_order.clone(),
            layers: layout.layers.clone(),
        }
    }

    /// Rebuild the page.
    ///
    /// Versioned pages use the registry's model for their version. Pages
    /// without a version, and pages of a non-PAGE version the registry does
    /// not know, use the latest model; the latter keep their version tag.
    /// An unknown PAGE version is an error.
    pub fn into_page(self, registry: &ModelRegistry) -> Result<Page> {
        let mut page = match &self.format_version {
            Some(version) => match registry.get(version) {
                Some(model) => Page::new(model),
                None if version.is_page() => {
                    return Err(Error::UnknownFormatVersion(version.to_string()))
                }
                None => {
                    log::warn!(
                        "No model for format version {}, using the latest templates",
                        version
                    );
                    let mut page = Page::unversioned(latest_model(registry)?);
                    page.set_format_version(Some(version.clone()));
                    page
                }
            },
            None => Page::unversioned(latest_model(registry)?),
        };

        let layout = page.layout_mut();
        restore_values(layout.attributes_mut(), &self.attributes)?;
        for region in &self.regions {
            region.restore(layout, None)?;
        }

        for relation in self.relations {
            layout.factory_mut().register_new_id(relation.id().as_str())?;
            for end in [relation.object1(), relation.object2()] {
                if layout.get(end).is_none() {
                    return Err(Error::ObjectNotFound(end.to_string()));
                }
            }
            layout.relations.add(relation);
        }

        if let Some(order) = self.reading_order {
            for id in order.root().group_ids() {
                layout.factory_mut().register_new_id(id.as_str())?;
            }
            let refs = order.region_ids().into_iter();
            require_regions(layout, refs.chain(order.root().group_region_refs()))?;
            layout.reading_order = Some(order);
        }
        if let Some(layers) = self.layers {
            for layer in layers.iter() {
                layout.factory_mut().register_new_id(layer.id().as_str())?;
                require_regions(layout, layer.regions.iter())?;
            }
            layout.layers = Some(layers);
        }

        let mut metadata = Metadata::new(self.metadata.creator);
        metadata.created = self.metadata.created;
        metadata.last_change = self.metadata.last_change;
        metadata.comments = self.metadata.comments;
        metadata.external_ref = self.metadata.external_ref;
        for snapshot in self.metadata.items {
            let mut item = layout.factory().create_metadata_item();
            restore_values(item.attributes_mut(), &snapshot.attributes)?;
            item.labels = snapshot.labels;
            metadata.add_item(item);
        }
        layout.metadata = metadata;

        log::debug!(
            "Restored page snapshot with {} objects",
            layout.object_count()
        );
        Ok(page)
    }
}

fn latest_model(registry: &ModelRegistry) -> Result<Arc<dyn AttributeFactory>> {
    let model: Arc<dyn AttributeFactory> = registry
        .latest()
        .ok_or_else(|| Error::Other("model registry is empty".into()))?;
    Ok(model)
}

/// Fail unless every id names a region of the layout.
fn require_regions<'a>(layout: &PageLayout, ids: impl IntoIterator<Item = &'a Id>) -> Result<()> {
    for id in ids {
        if layout.region(id).is_none() {
            return Err(Error::ObjectNotFound(id.to_string()));
        }
    }
    Ok(())
}

impl ObjectSnapshot {
    fn capture(layout: &PageLayout, id: &Id) -> Option<Self> {
        let object = layout.get(id)?;
        let (alternative_images, roles) = match object {
            ContentObject::Region(region) => (
                region.alternative_images.clone(),
                region
                    .roles()
                    .map(|role| (role.role_type().name().to_string(), values_of(role.attributes())))
                    .collect(),
            ),
            _ => (Vec::new(), IndexMap::new()),
        };
        Some(Self {
            id: id.clone(),
            type_name: object.content_type().name().to_string(),
            coords: object.core().coords.clone(),
            attributes: values_of(object.attributes()),
            labels: object.labels().cloned(),
            user_attributes: object
                .core()
                .user_attributes
                .as_ref()
                .map(values_of)
                .unwrap_or_default(),
            text: object.text_variants().filter(|v| !v.is_empty()).cloned(),
            alternative_images,
            roles,
            children: object
                .children()
                .iter()
                .filter_map(|child| Self::capture(layout, child))
                .collect(),
        })
    }

    fn restore(&self, layout: &mut PageLayout, parent: Option<&Id>) -> Result<()> {
        let content_type = ContentType::from_name(&self.type_name);
        let id = layout.create_with_id(&content_type, parent, self.id.as_str())?;

        let mut roles = Vec::with_capacity(self.roles.len());
        for (name, values) in &self.roles {
            let role_type = RoleType::from_name(name)?;
            let mut role = layout
                .factory()
                .create_region_role(role_type)
                .ok_or_else(|| Error::UnknownRoleType(name.clone()))?;
            restore_values(role.attributes_mut(), values)?;
            roles.push(role);
        }

        let object = layout
            .get_mut(&id)
            .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?;
        object.core_mut().coords = self.coords.clone();
        object.core_mut().labels = self.labels.clone();
        restore_values(object.attributes_mut(), &self.attributes)?;
        if !self.user_attributes.is_empty() {
            restore_values(object.core_mut().user_attributes_mut(), &self.user_attributes)?;
        }
        if let (Some(text), Some(variants)) = (&self.text, object.text_variants_mut()) {
            *variants = text.clone();
        }
        if let ContentObject::Region(region) = object {
            region.alternative_images = self.alternative_images.clone();
            for role in roles {
                region.add_role(role);
            }
        }

        for child in &self.children {
            child.restore(layout, Some(&id))?;
        }
        Ok(())
    }
}

fn values_of(attributes: &VariableMap) -> AttributeValues {
    attributes
        .iter()
        .filter_map(|v| Some((v.name().to_string(), v.value()?.clone())))
        .collect()
}

/// Put stored values back into a fresh attribute map.
///
/// Values the current constraint rejects are kept as they were stored.
/// Attributes the template does not know are added without a constraint.
fn restore_values(attributes: &mut VariableMap, values: &AttributeValues) -> Result<()> {
    for (name, value) in values {
        match attributes.get_mut(name) {
            Some(variable) => match variable.set_value(value.clone()) {
                Ok(()) => {}
                Err(Error::ConstraintViolation { .. }) => {
                    log::warn!(
                        "Stored value '{}' of {}.{} violates its constraint, keeping it",
                        value,
                        attributes.type_name(),
                        name
                    );
                    if let Some(variable) = attributes.get_mut(name) {
                        variable.force_value(value.clone())?;
                    }
                }
                Err(e) => return Err(e),
            },
            None => {
                let variable =
                    Variable::new(name.clone(), value.variable_type()).with_value(value.clone())?;
                attributes.insert(variable);
            }
        }
    }
    Ok(())
}

/// Serialize a page to JSON.
pub fn to_json(page: &Page, format: JsonFormat) -> Result<String> {
    let snapshot = PageSnapshot::from_page(page);
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&snapshot)?,
        JsonFormat::Compact => serde_json::to_string(&snapshot)?,
    };
    Ok(json)
}

/// Rebuild a page from JSON.
pub fn from_json(json: &str, registry: &ModelRegistry) -> Result<Page> {
    let snapshot: PageSnapshot = serde_json::from_str(json)?;
    snapshot.into_page(registry)
}

/// Write a page snapshot to a file.
pub fn save<P: AsRef<Path>>(page: &Page, path: P, format: JsonFormat) -> Result<()> {
    fs::write(path, to_json(page, format)?)?;
    Ok(())
}

/// Read a page snapshot from a file.
pub fn load<P: AsRef<Path>>(path: P, registry: &ModelRegistry) -> Result<Page> {
    let path = path.as_ref();
    log::debug!("Loading page snapshot from {}", path.display());
    from_json(&fs::read_to_string(path)?, registry)
}
