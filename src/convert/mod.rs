//! Conversion of pages between format versions.
//!
//! A [`LayoutConverter`] moves a layout from one version to another. The
//! built-in converters are [`StepConverter`]s made of [`ConversionRule`]s,
//! each covering one schema difference (script naming, region types that do
//! not exist in the target, content the target cannot hold). The
//! [`ConverterHub`] knows all of them, chains them where no direct converter
//! exists, and afterwards reconciles every attribute map with the target
//! version's templates.
//!
//! # Example
//!
//! ```no_run
//! use pagemodel::convert::ConverterHub;
//! use pagemodel::{FormatVersion, Page};
//!
//! fn report(hub: &ConverterHub, page: &Page) {
//!     match hub.check_for_compliance(page, &FormatVersion::PAGE_2010_03_19) {
//!         Some(messages) => messages.iter().for_each(|m| println!("{}", m)),
//!         None => println!("nothing to convert"),
//!     }
//! }
//! ```

mod chain;
mod converter;
mod hub;
mod message;
mod options;
pub mod reconcile;
mod rules;
pub mod scripts;

pub use chain::ChainConverter;
pub use converter::{
    AttributeOwner, ConversionRule, Edit, LabelOwner, LayoutConverter, PlannedChange,
    StepConverter,
};
pub use hub::ConverterHub;
pub use message::{ConversionMessage, MessageKind};
pub use options::{ConvertOptions, MissingRoute};
pub use reconcile::ReconcileStats;
pub use rules::{
    direct_converters, DropAlternativeImagesRule, DropGraphemesRule, DropLabelsRule,
    DropMetadataItemsRule, DropRolesRule, RetypeRegionsRule, ScriptDirection, ScriptRule, ScriptScope,
};
