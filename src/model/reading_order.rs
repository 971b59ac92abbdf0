//! Reading order and layers.

use crate::ident::Id;
use serde::{Deserialize, Serialize};

/// Member of a reading-order group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMember {
    /// Reference to a region
    RegionRef(Id),
    /// Nested group
    Group(Group),
}

/// An ordered or unordered group of reading-order members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: Id,

    /// Whether member order is significant
    pub ordered: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Region this group stands for, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_ref: Option<Id>,

    #[serde(default)]
    members: Vec<GroupMember>,
}

impl Group {
    pub(crate) fn new(id: Id, ordered: bool) -> Self {
        Self {
            id,
            ordered,
            caption: None,
            region_ref: None,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    /// Append a region reference.
    pub fn add_region_ref(&mut self, region: Id) {
        self.members.push(GroupMember::RegionRef(region));
    }

    /// Append a nested group.
    pub fn add_group(&mut self, group: Group) {
        self.members.push(GroupMember::Group(group));
    }

    /// Region ids in reading order (depth first).
    pub fn region_refs(&self) -> Vec<&Id> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a Id>) {
        for member in &self.members {
            match member {
                GroupMember::RegionRef(id) => out.push(id),
                GroupMember::Group(g) => g.collect_refs(out),
            }
        }
    }

    /// Whether a region is referenced anywhere below this group.
    pub fn contains_region(&self, region: &Id) -> bool {
        self.members.iter().any(|m| match m {
            GroupMember::RegionRef(id) => id == region,
            GroupMember::Group(g) => g.contains_region(region),
        })
    }

    /// Remove every reference to a region in this group and below.
    ///
    /// Returns the number of removed member references; a cleared
    /// `region_ref` is not counted.
    pub fn remove_region(&mut self, region: &Id) -> usize {
        if self.region_ref.as_ref() == Some(region) {
            self.region_ref = None;
        }
        let before = self.members.len();
        self.members
            .retain(|m| !matches!(m, GroupMember::RegionRef(id) if id == region));
        let mut removed = before - self.members.len();
        for member in &mut self.members {
            if let GroupMember::Group(g) = member {
                removed += g.remove_region(region);
            }
        }
        removed
    }

    /// Replace every reference to a region in this group and below.
    pub(crate) fn rename_region(&mut self, old: &Id, new: &Id) {
        if self.region_ref.as_ref() == Some(old) {
            self.region_ref = Some(new.clone());
        }
        for member in &mut self.members {
            match member {
                GroupMember::RegionRef(id) if *id == *old => *id = new.clone(),
                GroupMember::Group(g) => g.rename_region(old, new),
                GroupMember::RegionRef(_) => {}
            }
        }
    }

    /// Regions this group and its nested groups stand for.
    pub fn group_region_refs(&self) -> Vec<&Id> {
        let mut out: Vec<&Id> = self.region_ref.iter().collect();
        for member in &self.members {
            if let GroupMember::Group(g) = member {
                out.extend(g.group_region_refs());
            }
        }
        out
    }

    /// Find a group by id, including this one.
    pub fn find_group(&self, id: &Id) -> Option<&Group> {
        if self.id == *id {
            return Some(self);
        }
        self.members.iter().find_map(|m| match m {
            GroupMember::Group(g) => g.find_group(id),
            _ => None,
        })
    }

    /// Mutable variant of [`Group::find_group`].
    pub fn find_group_mut(&mut self, id: &Id) -> Option<&mut Group> {
        if self.id == *id {
            return Some(self);
        }
        self.members.iter_mut().find_map(|m| match m {
            GroupMember::Group(g) => g.find_group_mut(id),
            _ => None,
        })
    }

    /// Ids of this group and all nested groups.
    pub fn group_ids(&self) -> Vec<&Id> {
        let mut out = vec![&self.id];
        for member in &self.members {
            if let GroupMember::Group(g) = member {
                out.extend(g.group_ids());
            }
        }
        out
    }
}

/// Reading order of a page: a tree of groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingOrder {
    root: Group,
}

impl ReadingOrder {
    pub(crate) fn new(root: Group) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Region ids in reading order.
    pub fn region_ids(&self) -> Vec<&Id> {
        self.root.region_refs()
    }

    pub fn contains_region(&self, region: &Id) -> bool {
        self.root.contains_region(region)
    }

    pub fn remove_region(&mut self, region: &Id) -> usize {
        self.root.remove_region(region)
    }

    pub(crate) fn rename_region(&mut self, old: &Id, new: &Id) {
        self.root.rename_region(old, new);
    }
}

/// A layer of regions with a z-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    id: Id,

    pub z_index: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default)]
    pub regions: Vec<Id>,
}

impl Layer {
    pub(crate) fn new(id: Id, z_index: i32) -> Self {
        Self {
            id,
            z_index,
            caption: None,
            regions: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }
}

/// Layers of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layers {
    layers: Vec<Layer>,
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn get(&self, id: &Id) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == *id)
    }

    pub fn get_mut(&mut self, id: &Id) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == *id)
    }

    /// Layer containing a region.
    pub fn layer_of(&self, region: &Id) -> Option<&Layer> {
        self.layers.iter().find(|l| l.regions.contains(region))
    }

    /// Remove a region from every layer.
    pub fn remove_region(&mut self, region: &Id) -> usize {
        self.layers
            .iter_mut()
            .map(|l| {
                let before = l.regions.len();
                l.regions.retain(|r| r != region);
                before - l.regions.len()
            })
            .sum()
    }

    pub(crate) fn rename_region(&mut self, old: &Id, new: &Id) {
        for layer in &mut self.layers {
            for region in layer.regions.iter_mut().filter(|r| **r == *old) {
                *region = new.clone();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReadingOrder {
        let mut root = Group::new(Id::from("g1"), true);
        root.add_region_ref(Id::from("r1"));
        let mut nested = Group::new(Id::from("g2"), false);
        nested.add_region_ref(Id::from("r2"));
        nested.add_region_ref(Id::from("r3"));
        root.add_group(nested);
        root.add_region_ref(Id::from("r4"));
        ReadingOrder::new(root)
    }

    #[test]
    fn test_region_ids_depth_first() {
        let order = sample();
        let ids: Vec<&str> = order.region_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_remove_region_in_nested_group() {
        let mut order = sample();
        assert!(order.contains_region(&Id::from("r3")));
        assert_eq!(order.remove_region(&Id::from("r3")), 1);
        assert!(!order.contains_region(&Id::from("r3")));
        assert_eq!(order.region_ids().len(), 3);
    }

    #[test]
    fn test_remove_region_clears_root_region_ref() {
        let mut order = sample();
        order.root_mut().region_ref = Some(Id::from("r9"));
        order
            .root_mut()
            .find_group_mut(&Id::from("g2"))
            .unwrap()
            .region_ref = Some(Id::from("r9"));

        assert_eq!(order.remove_region(&Id::from("r9")), 0);
        assert!(order.root().region_ref.is_none());
        assert!(order.root().group_region_refs().is_empty());
    }

    #[test]
    fn test_rename_region() {
        let mut order = sample();
        order
            .root_mut()
            .find_group_mut(&Id::from("g2"))
            .unwrap()
            .region_ref = Some(Id::from("r2"));

        order.rename_region(&Id::from("r2"), &Id::from("side"));
        let ids: Vec<&str> = order.region_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["r1", "side", "r3", "r4"]);
        assert_eq!(order.root().group_region_refs(), vec![&Id::from("side")]);
    }

    #[test]
    fn test_find_group() {
        let mut order = sample();
        assert!(!order.root().find_group(&Id::from("g2")).unwrap().ordered);
        order
            .root_mut()
            .find_group_mut(&Id::from("g2"))
            .unwrap()
            .caption = Some("column".into());
        assert_eq!(order.root().group_ids().len(), 2);
        assert!(order.root().find_group(&Id::from("g9")).is_none());
    }

    #[test]
    fn test_layers() {
        let mut layers = Layers::new();
        let mut layer = Layer::new(Id::from("lay1"), 0);
        layer.regions.push(Id::from("r1"));
        layers.add(layer);

        assert_eq!(layers.layer_of(&Id::from("r1")).map(|l| l.z_index), Some(0));
        layers.rename_region(&Id::from("r1"), &Id::from("r7"));
        assert!(layers.layer_of(&Id::from("r1")).is_none());
        assert_eq!(layers.remove_region(&Id::from("r7")), 1);
        assert!(layers.layer_of(&Id::from("r7")).is_none());
    }
}
