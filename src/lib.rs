//! # pagemodel
//!
//! In-memory model of document page layouts in the PAGE XML family, with
//! version conversion between the PAGE schema releases.
//!
//! A [`Page`] holds a [`PageLayout`]: regions, text lines, words, glyphs and
//! grapheme elements, each carrying typed, constrained attributes taken from
//! the templates of the page's [`FormatVersion`]. The [`ConverterHub`] moves
//! pages between versions and reports every change it makes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagemodel::{ContentType, ConverterHub, FormatVersion, ModelRegistry, Page, RegionType};
//!
//! fn main() -> pagemodel::Result<()> {
//!     let registry = ModelRegistry::with_defaults()?;
//!     let mut page = Page::new(registry.require(&FormatVersion::PAGE_2013_07_15)?);
//!
//!     let layout = page.layout_mut();
//!     let region = layout.create_region(RegionType::Text, None)?;
//!     layout
//!         .get_mut(&region)
//!         .expect("just created")
//!         .attributes_mut()
//!         .set("primaryScript", "Latin")?;
//!     layout.create(&ContentType::TEXT_LINE, Some(&region))?;
//!
//!     let hub = ConverterHub::with_defaults()?;
//!     let target = registry.require(&FormatVersion::PAGE_2019_07_15)?;
//!     for message in hub.convert(&mut page, &target).unwrap_or_default() {
//!         println!("{}", message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed attributes**: values are checked against declared types and constraints
//! - **Unique ids**: one id registry per page, ids never reused
//! - **Version conversion**: direct and chained converters between all PAGE versions
//! - **Compliance checks**: report what a conversion would change without changing it
//! - **Snapshots**: JSON round-trip of whole pages
//! - **Parallel processing**: Uses Rayon to convert many pages at once

pub mod attr;
pub mod convert;
pub mod error;
pub mod ident;
pub mod model;
pub mod snapshot;
pub mod version;

// Re-export commonly used types
pub use attr::{
    AttributeFactory, Constraint, FormatModel, ModelRegistry, Variable, VariableMap,
    VariableType, VariableValue,
};
pub use convert::{
    ConversionMessage, ConvertOptions, ConverterHub, LayoutConverter, MessageKind, MissingRoute,
};
pub use error::{Error, Result};
pub use ident::{Id, IdRegister};
pub use model::{
    ContentFactory, ContentObject, ContentType, GraphemeType, LayoutStats, LowLevelTextType, Page,
    PageLayout, Region, RegionType, RoleType, TextObject,
};
pub use snapshot::{JsonFormat, PageSnapshot};
pub use version::FormatVersion;

use std::path::Path;

/// Create an empty page of a PAGE XML version.
///
/// # Example
///
/// ```
/// use pagemodel::{new_page, FormatVersion};
///
/// let page = new_page(&FormatVersion::PAGE_2019_07_15).unwrap();
/// assert_eq!(page.format_version(), Some(&FormatVersion::PAGE_2019_07_15));
/// ```
pub fn new_page(version: &FormatVersion) -> Result<Page> {
    Ok(Page::new(std::sync::Arc::new(FormatModel::page_xml(version)?)))
}

/// Load a page snapshot from a JSON file.
///
/// # Example
///
/// ```no_run
/// use pagemodel::load_snapshot;
///
/// let page = load_snapshot("page.json").unwrap();
/// println!("Objects: {}", page.layout().object_count());
/// ```
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Page> {
    let registry = ModelRegistry::with_defaults()?;
    snapshot::load(path, &registry)
}

/// Save a page snapshot as pretty-printed JSON.
pub fn save_snapshot<P: AsRef<Path>>(page: &Page, path: P) -> Result<()> {
    snapshot::save(page, path, JsonFormat::Pretty)
}

/// Convert a page to another PAGE XML version with the built-in converters.
///
/// Fails if the version is unknown or no conversion route exists.
///
/// # Example
///
/// ```no_run
/// use pagemodel::{convert_page, load_snapshot, FormatVersion};
///
/// let mut page = load_snapshot("page.json").unwrap();
/// let messages = convert_page(&mut page, &FormatVersion::PAGE_2010_03_19).unwrap();
/// for message in messages.unwrap_or_default() {
///     println!("{}", message);
/// }
/// ```
pub fn convert_page(
    page: &mut Page,
    target: &FormatVersion,
) -> Result<Option<Vec<ConversionMessage>>> {
    let registry = ModelRegistry::with_defaults()?;
    let hub = ConverterHub::with_defaults()?;
    hub.convert_with_options(page, &registry.require(target)?, &ConvertOptions::strict())
}

/// Report what converting a page to another version would change.
pub fn check_page(page: &Page, target: &FormatVersion) -> Result<Option<Vec<ConversionMessage>>> {
    let hub = ConverterHub::with_defaults()?;
    Ok(hub.check_for_compliance(page, target))
}
