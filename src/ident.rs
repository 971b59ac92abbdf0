//! Object identifiers and the per-page identifier registry.
//!
//! Every content object on a page carries an [`Id`] that is unique within
//! that page. Uniqueness is guaranteed by an [`IdRegister`], which is created
//! together with the page's content factory and lives as long as the page.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Identifier of a content object, relation, group or layer.
///
/// Cheap to clone; ordering and hashing follow the string form.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Id(Arc<str>);

impl Id {
    /// Creates an id without registering it.
    ///
    /// Use [`IdRegister::register`] to claim an id for a page.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id prefixes per object kind.
pub mod prefix {
    pub const REGION: &str = "r";
    pub const TEXT_LINE: &str = "l";
    pub const WORD: &str = "w";
    pub const GLYPH: &str = "c";
    pub const GRAPHEME: &str = "a";
    pub const GRAPHEME_GROUP: &str = "b";
    pub const NON_PRINTING_CHAR: &str = "i";
    pub const GROUP: &str = "g";
    pub const LAYER: &str = "lay";
    pub const RELATION: &str = "rel";
    pub const METADATA_ITEM: &str = "m";
}

/// Check that a string has the shape of an XML NCName (`[A-Za-z_][A-Za-z0-9_.-]*`).
pub fn is_valid_id(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Registry of the ids in use on one page.
#[derive(Debug, Clone, Default)]
pub struct IdRegister {
    used: HashSet<Id>,
    counters: HashMap<String, u64>,
}

impl IdRegister {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh id of the form `<prefix><n>`.
    ///
    /// The per-prefix counter starts at 1 and skips values that were
    /// registered explicitly.
    pub fn generate(&mut self, prefix: &str) -> Result<Id> {
        if !is_valid_id(prefix) {
            return Err(Error::invalid_id(prefix, "malformed prefix"));
        }
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let id = Id::from(format!("{}{}", prefix, counter));
            if !self.used.contains(&id) {
                self.used.insert(id.clone());
                return Ok(id);
            }
        }
    }

    /// Claim a specific id.
    pub fn register(&mut self, candidate: &str) -> Result<Id> {
        if !is_valid_id(candidate) {
            return Err(Error::invalid_id(candidate, "not a valid identifier"));
        }
        let id = Id::from(candidate);
        if self.used.contains(&id) {
            return Err(Error::invalid_id(candidate, "already in use"));
        }
        self.used.insert(id.clone());
        Ok(id)
    }

    /// Claim `candidate` if given, otherwise generate an id with `prefix`.
    pub fn register_or_create(&mut self, candidate: Option<&str>, prefix: &str) -> Result<Id> {
        match candidate {
            Some(c) => self.register(c),
            None => self.generate(prefix),
        }
    }

    /// Give up an id.
    ///
    /// Only used when an object moves to a new id; ids of removed objects
    /// stay claimed.
    pub(crate) fn release(&mut self, id: &Id) -> bool {
        self.used.remove(id)
    }

    /// Check whether an id is in use.
    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(&Id::from(id))
    }

    /// Number of ids in use.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Check whether no ids are in use.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
