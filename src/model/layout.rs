//! The page layout: arena of content objects plus page-level structures.

use super::content_type::{ContentType, GraphemeType, LowLevelTextType, RegionType};
use super::factory::ContentFactory;
use super::metadata::Metadata;
use super::object::{ContentObject, GraphemeElement, GraphemeKind, Region, TextObject};
use super::reading_order::{Layers, ReadingOrder};
use super::relations::Relations;
use crate::attr::{AttributeFactory, VariableMap};
use crate::error::{Error, Result};
use crate::ident::Id;
use std::collections::HashMap;
use std::sync::Arc;

/// Layout of one page.
///
/// Objects are owned by the layout and addressed by id. The layout keeps the
/// hierarchy consistent: a region has at most one parent, there are no
/// cycles, and each text object sits under a parent of the matching kind.
#[derive(Debug, Clone)]
pub struct PageLayout {
    factory: ContentFactory,
    objects: HashMap<Id, ContentObject>,
    regions: Vec<Id>,
    pub(crate) attributes: VariableMap,
    pub relations: Relations,
    pub reading_order: Option<ReadingOrder>,
    pub layers: Option<Layers>,
    pub metadata: Metadata,
}

impl PageLayout {
    /// Create an empty layout whose objects use the given attribute templates.
    pub fn new(attributes: Arc<dyn AttributeFactory>) -> Self {
        let factory = ContentFactory::new(attributes);
        let page_attributes = factory.create_page_attributes();
        Self {
            factory,
            objects: HashMap::new(),
            regions: Vec::new(),
            attributes: page_attributes,
            relations: Relations::new(),
            reading_order: None,
            layers: None,
            metadata: Metadata::default(),
        }
    }

    pub fn factory(&self) -> &ContentFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut ContentFactory {
        &mut self.factory
    }

    /// Page-level attributes (`Page` template).
    pub fn attributes(&self) -> &VariableMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut VariableMap {
        &mut self.attributes
    }

    /// Create an object through the factory and link it under `parent`.
    pub fn create(&mut self, content_type: &ContentType, parent: Option<&Id>) -> Result<Id> {
        self.check_containment(content_type, parent)?;
        let object = self.factory.create(content_type, parent)?;
        self.add(object)
    }

    /// Like [`PageLayout::create`] with an externally given id.
    pub fn create_with_id(
        &mut self,
        content_type: &ContentType,
        parent: Option<&Id>,
        id: &str,
    ) -> Result<Id> {
        self.check_containment(content_type, parent)?;
        let object = self.factory.create_with_id(content_type, parent, id)?;
        self.add(object)
    }

    /// Create a region, top-level or nested.
    pub fn create_region(&mut self, region_type: RegionType, parent: Option<&Id>) -> Result<Id> {
        self.create(&ContentType::Region(region_type), parent)
    }

    /// Link a fresh object created by this layout's factory.
    ///
    /// The object's parent link decides where it goes.
    pub(crate) fn add(&mut self, object: ContentObject) -> Result<Id> {
        let id = object.id().clone();
        if self.objects.contains_key(&id) {
            return Err(Error::invalid_id(id.as_str(), "already in layout"));
        }
        if !self.factory.id_register().contains(id.as_str()) {
            return Err(Error::invalid_id(id.as_str(), "not registered with this page"));
        }
        if !object.children().is_empty() {
            return Err(Error::InvalidContainment(format!(
                "{} already has children",
                id
            )));
        }
        let parent = object.parent().cloned();
        self.check_containment(&object.content_type(), parent.as_ref())?;

        match &parent {
            None => self.regions.push(id.clone()),
            Some(p) => {
                let parent_obj = self
                    .objects
                    .get_mut(p)
                    .ok_or_else(|| Error::ObjectNotFound(p.to_string()))?;
                link_child(parent_obj, &object, id.clone());
            }
        }
        self.objects.insert(id.clone(), object);
        Ok(id)
    }

    fn check_containment(&self, child: &ContentType, parent: Option<&Id>) -> Result<()> {
        let parent_type = match parent {
            None => None,
            Some(p) => Some(
                self.objects
                    .get(p)
                    .ok_or_else(|| Error::ObjectNotFound(p.to_string()))?
                    .content_type(),
            ),
        };
        let allowed = match (child, &parent_type) {
            (ContentType::Region(_), None) => true,
            (ContentType::Region(_), Some(ContentType::Region(_))) => true,
            (
                ContentType::LowLevelText(LowLevelTextType::TextLine),
                Some(ContentType::Region(RegionType::Text)),
            ) => true,
            (ContentType::LowLevelText(kind), Some(ContentType::LowLevelText(parent_kind))) => {
                parent_kind.child_kind() == Some(*kind)
            }
            (ContentType::Grapheme(_), Some(ContentType::LowLevelText(LowLevelTextType::Glyph))) => {
                true
            }
            (
                ContentType::Grapheme(GraphemeType::Grapheme | GraphemeType::NonPrintingCharacter),
                Some(ContentType::Grapheme(GraphemeType::GraphemeGroup)),
            ) => true,
            _ => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(Error::InvalidContainment(format!(
                "{} cannot be placed in {}",
                child,
                parent_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "the page".to_string())
            )))
        }
    }

    pub fn get(&self, id: &Id) -> Option<&ContentObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: &Id) -> Option<&mut ContentObject> {
        self.objects.get_mut(id)
    }

    /// Look up an object by its string id.
    pub fn find(&self, id: &str) -> Option<&ContentObject> {
        self.objects.get(&Id::from(id))
    }

    pub fn region(&self, id: &Id) -> Option<&Region> {
        self.get(id).and_then(ContentObject::as_region)
    }

    pub fn region_mut(&mut self, id: &Id) -> Option<&mut Region> {
        self.get_mut(id).and_then(ContentObject::as_region_mut)
    }

    pub fn text_object(&self, id: &Id) -> Option<&TextObject> {
        self.get(id).and_then(ContentObject::as_text_object)
    }

    pub fn text_object_mut(&mut self, id: &Id) -> Option<&mut TextObject> {
        self.get_mut(id).and_then(ContentObject::as_text_object_mut)
    }

    pub fn grapheme(&self, id: &Id) -> Option<&GraphemeElement> {
        self.get(id).and_then(ContentObject::as_grapheme)
    }

    /// Top-level region ids in document order.
    pub fn regions(&self) -> &[Id] {
        &self.regions
    }

    /// Number of objects of all kinds.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All object ids, depth first in document order.
    pub fn ids(&self) -> Vec<Id> {
        let mut out = Vec::with_capacity(self.objects.len());
        let mut stack: Vec<Id> = self.regions.iter().rev().cloned().collect();
        while let Some(id) = stack.pop() {
            if let Some(obj) = self.objects.get(&id) {
                stack.extend(obj.children().into_iter().rev());
            }
            out.push(id);
        }
        out
    }

    /// All region ids (nested included), depth first.
    pub fn region_ids(&self) -> Vec<Id> {
        self.ids()
            .into_iter()
            .filter(|id| matches!(self.objects.get(id), Some(ContentObject::Region(_))))
            .collect()
    }

    /// Ids of objects with the given content type, depth first.
    pub fn ids_of_type(&self, content_type: &ContentType) -> Vec<Id> {
        self.ids()
            .into_iter()
            .filter(|id| {
                self.objects
                    .get(id)
                    .is_some_and(|o| o.content_type() == *content_type)
            })
            .collect()
    }

    /// Ancestors of an object, nearest first.
    pub fn ancestors(&self, id: &Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut current = self.objects.get(id).and_then(|o| o.parent().cloned());
        while let Some(p) = current {
            current = self.objects.get(&p).and_then(|o| o.parent().cloned());
            out.push(p);
        }
        out
    }

    /// Give an object a new id.
    ///
    /// The candidate is claimed first; then the object, its parent's child
    /// list, its children's parent links, relations, reading order and layers
    /// are switched over, and only then is the old id released. Reassigning
    /// an object its own id succeeds without changes.
    pub fn reassign_id(&mut self, id: &Id, candidate: &str) -> Result<Id> {
        if !self.objects.contains_key(id) {
            return Err(Error::ObjectNotFound(id.to_string()));
        }
        if id.as_str() == candidate {
            return Ok(id.clone());
        }
        let new_id = self.factory.id_register_mut().register(candidate)?;

        let mut object = self
            .objects
            .remove(id)
            .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?;
        object.core_mut().set_id(new_id.clone());
        let parent = object.parent().cloned();
        let children = object.children();
        self.objects.insert(new_id.clone(), object);

        match parent {
            None => {
                for slot in self.regions.iter_mut().filter(|r| **r == *id) {
                    *slot = new_id.clone();
                }
            }
            Some(p) => {
                if let Some(parent_obj) = self.objects.get_mut(&p) {
                    parent_obj.replace_child(id, &new_id);
                }
            }
        }
        for child in &children {
            if let Some(obj) = self.objects.get_mut(child) {
                obj.core_mut().parent = Some(new_id.clone());
            }
        }

        self.relations.rename_object(id, &new_id);
        if let Some(order) = &mut self.reading_order {
            order.rename_region(id, &new_id);
        }
        if let Some(layers) = &mut self.layers {
            layers.rename_region(id, &new_id);
        }

        self.factory.id_register_mut().release(id);
        log::debug!("Reassigned id {} -> {}", id, new_id);
        Ok(new_id)
    }

    /// Move a region under another region, or to the top level.
    pub fn move_region(&mut self, id: &Id, new_parent: Option<&Id>) -> Result<()> {
        if self.region(id).is_none() {
            return Err(Error::ObjectNotFound(id.to_string()));
        }
        if let Some(target) = new_parent {
            if self.region(target).is_none() {
                return Err(Error::InvalidContainment(format!(
                    "{} is not a region",
                    target
                )));
            }
            if target == id || self.ancestors(target).contains(id) {
                return Err(Error::InvalidContainment(format!(
                    "moving {} into {} would create a cycle",
                    id, target
                )));
            }
        }

        self.detach(id);
        match new_parent {
            None => self.regions.push(id.clone()),
            Some(target) => {
                if let Some(region) = self.region_mut(target) {
                    region.regions.push(id.clone());
                }
            }
        }
        if let Some(obj) = self.objects.get_mut(id) {
            obj.core_mut().parent = new_parent.cloned();
        }
        Ok(())
    }

    fn detach(&mut self, id: &Id) {
        let parent = self.objects.get(id).and_then(|o| o.parent().cloned());
        match parent {
            None => self.regions.retain(|r| r != id),
            Some(p) => {
                if let Some(parent_obj) = self.objects.get_mut(&p) {
                    parent_obj.unlink_child(id);
                }
            }
        }
    }

    /// Remove an object with everything below it.
    ///
    /// Relations and reading-order/layer references to any removed object are
    /// dropped too. Removed ids are not released for reuse.
    pub fn remove(&mut self, id: &Id) -> Result<ContentObject> {
        if !self.objects.contains_key(id) {
            return Err(Error::ObjectNotFound(id.to_string()));
        }
        self.detach(id);

        let mut removed_root = None;
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            let Some(obj) = self.objects.remove(&current) else {
                continue;
            };
            stack.extend(obj.children());
            self.relations.remove_involving(&current);
            if matches!(obj, ContentObject::Region(_)) {
                if let Some(order) = &mut self.reading_order {
                    order.remove_region(&current);
                }
                if let Some(layers) = &mut self.layers {
                    layers.remove_region(&current);
                }
            }
            if current == *id {
                removed_root = Some(obj);
            }
        }
        log::debug!("Removed {} and its descendants", id);
        removed_root.ok_or_else(|| Error::ObjectNotFound(id.to_string()))
    }

    /// Remove all grapheme elements of a glyph.
    pub fn clear_graphemes(&mut self, glyph: &Id) -> Result<usize> {
        let children = match self.text_object(glyph) {
            Some(t) if t.kind() == LowLevelTextType::Glyph => t.children().to_vec(),
            _ => return Err(Error::ObjectNotFound(glyph.to_string())),
        };
        for child in &children {
            self.remove(child)?;
        }
        Ok(children.len())
    }

    /// Rebuild the primary text of an object from its children, recursively.
    ///
    /// Words join with a space, lines with a newline and glyphs with nothing.
    /// Objects without children keep their own text.
    pub fn compose_text(&mut self, id: &Id) -> Result<Option<String>> {
        let obj = self
            .objects
            .get(id)
            .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?;
        let (children, separator) = match obj {
            ContentObject::Region(r) if r.text.is_some() => (r.text_lines().to_vec(), "\n"),
            ContentObject::Text(t) => match t.kind {
                LowLevelTextType::TextLine => (t.children.clone(), " "),
                LowLevelTextType::Word => (t.children.clone(), ""),
                LowLevelTextType::Glyph => (Vec::new(), ""),
            },
            _ => return Ok(obj.text().map(str::to_string)),
        };
        if children.is_empty() {
            return Ok(obj.text().map(str::to_string));
        }

        let mut parts = Vec::with_capacity(children.len());
        for child in &children {
            if let Some(text) = self.compose_text(child)? {
                parts.push(text);
            }
        }
        let text = parts.join(separator);
        if let Some(variants) = self.objects.get_mut(id).and_then(|o| o.text_variants_mut()) {
            variants.set_text(text.clone());
        }
        Ok(Some(text))
    }

    /// Change the type of a region and re-tag its attribute map.
    ///
    /// Text content and lines are dropped when a text region becomes another type.
    pub(crate) fn retype_region(&mut self, id: &Id, region_type: RegionType) -> Result<()> {
        let lines = {
            let region = self
                .region_mut(id)
                .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?;
            region.core.attributes.set_type_name(region_type.name());
            region.region_type = region_type;
            if region.region_type.is_text() {
                if region.text.is_none() {
                    region.text = Some(Default::default());
                }
                Vec::new()
            } else {
                region.text.take().map(|t| t.lines).unwrap_or_default()
            }
        };
        for line in lines {
            // the container is already gone
            if let Some(obj) = self.objects.get_mut(&line) {
                obj.core_mut().parent = None;
            }
            self.remove(&line)?;
        }
        Ok(())
    }

    /// Iterate all objects mutably, in no particular order.
    pub(crate) fn objects_mut(&mut self) -> impl Iterator<Item = &mut ContentObject> {
        self.objects.values_mut()
    }

    /// Iterate all objects, in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = &ContentObject> {
        self.objects.values()
    }
}

fn link_child(parent: &mut ContentObject, child: &ContentObject, id: Id) {
    match (parent, child) {
        (ContentObject::Region(p), ContentObject::Region(_)) => p.regions.push(id),
        (ContentObject::Region(p), ContentObject::Text(_)) => {
            if let Some(text) = &mut p.text {
                text.lines.push(id);
            }
        }
        (ContentObject::Text(p), _) => p.children.push(id),
        (ContentObject::Grapheme(p), _) => {
            if let GraphemeKind::Group { members } = &mut p.kind {
                members.push(id);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::FormatModel;
    use crate::model::relations::RelationType;
    use crate::version::FormatVersion;

    fn layout() -> PageLayout {
        PageLayout::new(Arc::new(
            FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap(),
        ))
    }

    #[test]
    fn test_text_hierarchy() {
        let mut l = layout();
        let region = l.create_region(RegionType::Text, None).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
        let word = l.create(&ContentType::WORD, Some(&line)).unwrap();
        let glyph = l.create(&ContentType::GLYPH, Some(&word)).unwrap();
        let group = l.create(&ContentType::GRAPHEME_GROUP, Some(&glyph)).unwrap();
        l.create(&ContentType::GRAPHEME, Some(&group)).unwrap();

        assert_eq!(l.region(&region).unwrap().text_lines(), &[line.clone()]);
        assert_eq!(l.object_count(), 6);
        assert_eq!(l.ids().first(), Some(&region));
        assert_eq!(l.ancestors(&glyph), vec![word, line, region]);
    }

    #[test]
    fn test_containment_kinds_are_checked() {
        let mut l = layout();
        let image = l.create_region(RegionType::Image, None).unwrap();
        let text = l.create_region(RegionType::Text, None).unwrap();

        assert!(matches!(
            l.create(&ContentType::TEXT_LINE, Some(&image)),
            Err(Error::InvalidContainment(_))
        ));
        assert!(l.create(&ContentType::WORD, Some(&text)).is_err());
        assert!(l.create(&ContentType::TEXT_LINE, None).is_err());
        assert!(matches!(
            l.create(&ContentType::TEXT_LINE, Some(&Id::from("nope"))),
            Err(Error::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_group_cannot_contain_group() {
        let mut l = layout();
        let region = l.create_region(RegionType::Text, None).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
        let word = l.create(&ContentType::WORD, Some(&line)).unwrap();
        let glyph = l.create(&ContentType::GLYPH, Some(&word)).unwrap();
        let group = l.create(&ContentType::GRAPHEME_GROUP, Some(&glyph)).unwrap();

        assert!(l.create(&ContentType::NON_PRINTING_CHAR, Some(&group)).is_ok());
        assert!(matches!(
            l.create(&ContentType::GRAPHEME_GROUP, Some(&group)),
            Err(Error::InvalidContainment(_))
        ));
    }

    #[test]
    fn test_move_region_rejects_cycles() {
        let mut l = layout();
        let a = l.create_region(RegionType::Table, None).unwrap();
        let b = l.create_region(RegionType::Text, Some(&a)).unwrap();
        let c = l.create_region(RegionType::Text, Some(&b)).unwrap();

        assert!(l.move_region(&a, Some(&c)).is_err());
        assert!(l.move_region(&a, Some(&a)).is_err());

        l.move_region(&c, None).unwrap();
        assert_eq!(l.regions(), &[a.clone(), c.clone()]);
        assert!(l.region(&b).unwrap().regions().is_empty());
        assert_eq!(l.get(&c).unwrap().parent(), None);

        l.move_region(&a, Some(&c)).unwrap();
        assert_eq!(l.regions(), &[c.clone()]);
        assert_eq!(l.ancestors(&b), vec![a, c]);
    }

    #[test]
    fn test_remove_cleans_references() {
        let mut l = layout();
        let a = l.create_region(RegionType::Text, None).unwrap();
        let b = l.create_region(RegionType::Image, None).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&a)).unwrap();

        let rel = l
            .factory_mut()
            .create_relation(&a, &b, RelationType::Link)
            .unwrap();
        l.relations.add(rel);
        let mut order = l.factory_mut().create_reading_order().unwrap();
        order.root_mut().add_region_ref(a.clone());
        order.root_mut().add_region_ref(b.clone());
        l.reading_order = Some(order);

        let removed = l.remove(&a).unwrap();
        assert_eq!(removed.id(), &a);
        assert!(l.get(&line).is_none());
        assert!(l.relations.is_empty());
        assert_eq!(
            l.reading_order.as_ref().unwrap().region_ids(),
            vec![&b]
        );
        assert_eq!(l.regions(), &[b]);
        // ids are not recycled
        assert!(l.factory().id_register().contains(a.as_str()));
    }

    #[test]
    fn test_add_rejects_foreign_objects() {
        let mut l = layout();
        let mut other = layout();
        let region = other.create_region(RegionType::Text, None).unwrap();
        other.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();

        let mut foreign = other.get(&region).unwrap().clone();
        assert!(matches!(l.add(foreign.clone()), Err(Error::InvalidId { .. })));

        // same id string claimed here, but the copy brings its children along
        l.factory_mut().register_new_id(region.as_str()).unwrap();
        assert!(matches!(
            l.add(foreign.clone()),
            Err(Error::InvalidContainment(_))
        ));

        foreign.as_region_mut().unwrap().text_mut().unwrap().lines.clear();
        assert!(l.add(foreign).is_ok());
        assert_eq!(l.create_region(RegionType::Text, None).unwrap().as_str(), "r2");
    }

    #[test]
    fn test_reassign_id_rewrites_references() {
        let mut l = layout();
        let outer = l.create_region(RegionType::Table, None).unwrap();
        let region = l.create_region(RegionType::Text, Some(&outer)).unwrap();
        let nested = l.create_region(RegionType::Image, Some(&region)).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
        let other = l.create_region(RegionType::Separator, None).unwrap();

        let rel = l
            .factory_mut()
            .create_relation(&region, &other, RelationType::Join)
            .unwrap();
        l.relations.add(rel);
        let mut order = l.factory_mut().create_reading_order().unwrap();
        order.root_mut().add_region_ref(region.clone());
        order.root_mut().add_region_ref(other.clone());
        l.reading_order = Some(order);
        let mut layers = l.factory().create_layers();
        let mut layer = l.factory_mut().create_layer(1).unwrap();
        layer.regions.push(region.clone());
        layers.add(layer);
        l.layers = Some(layers);

        let renamed = l.reassign_id(&region, "caption").unwrap();
        assert_eq!(renamed.as_str(), "caption");
        assert!(l.get(&region).is_none());
        assert_eq!(l.get(&renamed).unwrap().id(), &renamed);
        assert_eq!(l.region(&outer).unwrap().regions(), &[renamed.clone()]);
        assert_eq!(l.get(&line).unwrap().parent(), Some(&renamed));
        assert_eq!(l.get(&nested).unwrap().parent(), Some(&renamed));
        assert!(l.relations.get(&renamed, &other).is_some());
        assert_eq!(l.relations.relations_of(&region).count(), 0);
        assert_eq!(
            l.reading_order.as_ref().unwrap().region_ids(),
            vec![&renamed, &other]
        );
        assert_eq!(
            l.layers.as_ref().unwrap().layer_of(&renamed).map(|x| x.z_index),
            Some(1)
        );
        assert_eq!(l.ancestors(&line), vec![renamed.clone(), outer]);

        // the old id is free again, the new one is taken
        let registry = l.factory().id_register();
        assert!(!registry.contains(region.as_str()));
        assert!(registry.contains("caption"));
    }

    #[test]
    fn test_reassign_id_top_level_and_noop() {
        let mut l = layout();
        let a = l.create_region(RegionType::Text, None).unwrap();
        let b = l.create_region(RegionType::Image, None).unwrap();

        assert_eq!(l.reassign_id(&a, a.as_str()).unwrap(), a);
        let renamed = l.reassign_id(&a, "header").unwrap();
        assert_eq!(l.regions(), &[renamed, b]);
    }

    #[test]
    fn test_reassign_id_rejects_collisions() {
        let mut l = layout();
        let a = l.create_region(RegionType::Text, None).unwrap();
        let b = l.create_region(RegionType::Image, None).unwrap();
        let before = l.factory().id_register().len();

        assert!(matches!(
            l.reassign_id(&a, b.as_str()),
            Err(Error::InvalidId { .. })
        ));
        assert!(matches!(
            l.reassign_id(&a, "1st"),
            Err(Error::InvalidId { .. })
        ));
        assert!(matches!(
            l.reassign_id(&Id::from("r9"), "x"),
            Err(Error::ObjectNotFound(_))
        ));
        assert_eq!(l.get(&a).unwrap().id(), &a);
        assert_eq!(l.regions(), &[a.clone(), b]);
        assert_eq!(l.factory().id_register().len(), before);
        // the live id stays claimed
        assert!(l.factory_mut().register_new_id(a.as_str()).is_err());
    }

    #[test]
    fn test_compose_text() {
        let mut l = layout();
        let region = l.create_region(RegionType::Text, None).unwrap();
        for words in [["Hello", "world"], ["second", "line"]] {
            let line = l.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
            for w in words {
                let word = l.create(&ContentType::WORD, Some(&line)).unwrap();
                l.get_mut(&word)
                    .unwrap()
                    .text_variants_mut()
                    .unwrap()
                    .set_text(w);
            }
        }

        let text = l.compose_text(&region).unwrap();
        assert_eq!(text.as_deref(), Some("Hello world\nsecond line"));
        assert_eq!(l.get(&region).unwrap().text(), Some("Hello world\nsecond line"));
    }

    #[test]
    fn test_retype_region_drops_lines() {
        let mut l = layout();
        let region = l.create_region(RegionType::Text, None).unwrap();
        let line = l.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();

        l.retype_region(&region, RegionType::Unknown).unwrap();
        let r = l.region(&region).unwrap();
        assert_eq!(r.region_type(), &RegionType::Unknown);
        assert_eq!(r.core().attributes().type_name(), "UnknownRegion");
        assert!(r.text().is_none());
        assert!(l.get(&line).is_none());
        assert_eq!(l.regions(), &[region]);
    }
}
