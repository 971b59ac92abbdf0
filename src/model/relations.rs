//! Relations between content objects.

use super::Labels;
use crate::ident::Id;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    ParentChild,
    Link,
    Join,
}

/// A directed edge between two content objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObjectRelation {
    id: Id,
    object1: Id,
    object2: Id,
    relation_type: RelationType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

impl ContentObjectRelation {
    pub(crate) fn new(id: Id, object1: Id, object2: Id, relation_type: RelationType) -> Self {
        Self {
            id,
            object1,
            object2,
            relation_type,
            custom: None,
            comments: None,
            labels: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn object1(&self) -> &Id {
        &self.object1
    }

    pub fn object2(&self) -> &Id {
        &self.object2
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    /// Whether either end is `id`.
    pub fn involves(&self, id: &Id) -> bool {
        self.object1 == *id || self.object2 == *id
    }
}

/// All relations of a page, keyed by `(object1, object2)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relations {
    edges: IndexMap<(Id, Id), ContentObjectRelation>,
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation, replacing one with the same directed pair.
    pub fn add(&mut self, relation: ContentObjectRelation) -> Option<ContentObjectRelation> {
        let key = (relation.object1.clone(), relation.object2.clone());
        self.edges.insert(key, relation)
    }

    /// Relation between two objects, in either direction.
    pub fn get(&self, id1: &Id, id2: &Id) -> Option<&ContentObjectRelation> {
        self.edges
            .get(&(id1.clone(), id2.clone()))
            .or_else(|| self.edges.get(&(id2.clone(), id1.clone())))
    }

    pub fn get_mut(&mut self, id1: &Id, id2: &Id) -> Option<&mut ContentObjectRelation> {
        let forward = (id1.clone(), id2.clone());
        let key = if self.edges.contains_key(&forward) {
            forward
        } else {
            (id2.clone(), id1.clone())
        };
        self.edges.get_mut(&key)
    }

    /// Remove the relation between two objects, in either direction.
    pub fn remove(&mut self, id1: &Id, id2: &Id) -> Option<ContentObjectRelation> {
        self.edges
            .shift_remove(&(id1.clone(), id2.clone()))
            .or_else(|| self.edges.shift_remove(&(id2.clone(), id1.clone())))
    }

    /// Remove every relation touching `id`. Returns how many were removed.
    pub fn remove_involving(&mut self, id: &Id) -> usize {
        let before = self.edges.len();
        self.edges.retain(|_, rel| !rel.involves(id));
        before - self.edges.len()
    }

    /// Point every relation touching `old` at `new` instead, keeping order.
    pub(crate) fn rename_object(&mut self, old: &Id, new: &Id) -> usize {
        if !self.edges.values().any(|rel| rel.involves(old)) {
            return 0;
        }
        let mut renamed = 0;
        self.edges = std::mem::take(&mut self.edges)
            .into_values()
            .map(|mut rel| {
                if rel.involves(old) {
                    renamed += 1;
                    if rel.object1 == *old {
                        rel.object1 = new.clone();
                    }
                    if rel.object2 == *old {
                        rel.object2 = new.clone();
                    }
                }
                ((rel.object1.clone(), rel.object2.clone()), rel)
            })
            .collect();
        renamed
    }

    /// Relations touching `id`.
    pub fn relations_of<'a>(&'a self, id: &'a Id) -> impl Iterator<Item = &'a ContentObjectRelation> {
        self.edges.values().filter(move |rel| rel.involves(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentObjectRelation> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
