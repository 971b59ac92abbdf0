//! Typed, constrained attributes.
//!
//! Every content object owns a [`VariableMap`] created from the attribute
//! template of its content type in the page's format version. Templates come
//! from an [`AttributeFactory`], normally a [`FormatModel`] built from the
//! PAGE XML attribute catalogue.

mod constraint;
mod factory;
mod map;
pub(crate) mod schema;
mod value;
mod variable;

pub use constraint::Constraint;
pub use factory::{page_type_known, AttributeFactory, FormatModel, ModelRegistry};
pub use map::VariableMap;
pub use schema::{ISO_SCRIPTS, LEGACY_SCRIPTS};
pub use value::{VariableType, VariableValue};
pub use variable::Variable;
