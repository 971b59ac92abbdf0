//! Attribute templates per format version.

use super::schema::{self, AttributeSpec, ConstraintSpec, ATTRIBUTES, TYPE_SINCE};
use super::{Constraint, Variable, VariableMap};
use crate::error::{Error, Result};
use crate::version::{FormatVersion, PAGE_VERSIONS};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Source of fresh attribute maps for content objects.
///
/// Implementations hand out deep copies of their templates so that objects
/// never share attribute state.
pub trait AttributeFactory: Send + Sync + fmt::Debug {
    /// Create the attributes of a new object of the given content type.
    ///
    /// Unknown type names yield an empty map tagged with the name.
    fn create_attributes(&self, type_name: &str) -> VariableMap;

    /// Whether the factory has a template for the type.
    fn knows_type(&self, type_name: &str) -> bool {
        let _ = type_name;
        true
    }

    /// Format version whose templates this factory serves, if any.
    fn version(&self) -> Option<&FormatVersion> {
        None
    }
}

/// Attribute templates of one format version.
#[derive(Debug, Clone)]
pub struct FormatModel {
    version: FormatVersion,
    templates: HashMap<String, VariableMap>,
}

impl FormatModel {
    /// Create a model without templates.
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            templates: HashMap::new(),
        }
    }

    /// Add or replace the template for `map.type_name()`.
    pub fn with_template(mut self, map: VariableMap) -> Self {
        self.insert_template(map);
        self
    }

    /// Add or replace the template for `map.type_name()`.
    pub fn insert_template(&mut self, map: VariableMap) {
        self.templates.insert(map.type_name().to_string(), map);
    }

    /// Build the templates of a PAGE XML schema version from the catalogue.
    pub fn page_xml(version: &FormatVersion) -> Result<Self> {
        let index = PAGE_VERSIONS
            .iter()
            .position(|v| v == version)
            .ok_or_else(|| Error::UnknownFormatVersion(version.to_string()))?;

        let mut model = Self::new(version.clone());
        for (type_name, since) in TYPE_SINCE {
            if *since <= index {
                model.insert_template(VariableMap::new(*type_name));
            }
        }
        for spec in ATTRIBUTES.iter().filter(|s| s.applies_to(index)) {
            for owner in spec.owners {
                if let Some(template) = model.templates.get_mut(*owner) {
                    template.insert(build_variable(spec)?);
                }
            }
        }

        log::debug!(
            "Built attribute model for {} ({} content types)",
            version,
            model.templates.len()
        );
        Ok(model)
    }

    pub fn version(&self) -> &FormatVersion {
        &self.version
    }

    /// Template of a content type.
    pub fn template(&self, type_name: &str) -> Option<&VariableMap> {
        self.templates.get(type_name)
    }

    /// Check whether the version knows a content type.
    pub fn knows_type(&self, type_name: &str) -> bool {
        self.templates.contains_key(type_name)
    }

    /// Names of all content types with a template.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl AttributeFactory for FormatModel {
    fn create_attributes(&self, type_name: &str) -> VariableMap {
        self.templates
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| VariableMap::new(type_name))
    }

    fn knows_type(&self, type_name: &str) -> bool {
        self.templates.contains_key(type_name)
    }

    fn version(&self) -> Option<&FormatVersion> {
        Some(&self.version)
    }
}

fn build_variable(spec: &AttributeSpec) -> Result<Variable> {
    let var = Variable::new(spec.name, spec.kind);
    let constraint = match spec.constraint {
        ConstraintSpec::None => return Ok(var),
        ConstraintSpec::Values(values) => Constraint::valid_values(values.iter().copied()),
        ConstraintSpec::Range(min, max) => Constraint::range(min, max),
        ConstraintSpec::Pattern(expr) => Constraint::pattern(expr)?,
    };
    Ok(var.with_constraint(constraint))
}

/// Attribute models of all supported versions, built eagerly.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<FormatVersion, Arc<FormatModel>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every PAGE XML version.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        for version in PAGE_VERSIONS.iter() {
            registry.register(FormatModel::page_xml(version)?);
        }
        Ok(registry)
    }

    /// Register a model, replacing one for the same version.
    pub fn register(&mut self, model: FormatModel) {
        self.models
            .insert(model.version().clone(), Arc::new(model));
    }

    /// Model of a version.
    pub fn get(&self, version: &FormatVersion) -> Option<Arc<FormatModel>> {
        self.models.get(version).cloned()
    }

    /// Model of a version, or an error naming it.
    pub fn require(&self, version: &FormatVersion) -> Result<Arc<FormatModel>> {
        self.get(version)
            .ok_or_else(|| Error::UnknownFormatVersion(version.to_string()))
    }

    /// Model of the latest PAGE XML version.
    pub fn latest(&self) -> Option<Arc<FormatModel>> {
        self.get(&FormatVersion::LATEST_PAGE)
    }

    /// Registered versions, oldest first within each family.
    pub fn versions(&self) -> Vec<FormatVersion> {
        let mut versions: Vec<_> = self.models.keys().cloned().collect();
        versions.sort_by(|a, b| a.name().cmp(b.name()));
        versions
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Whether a content type exists in a PAGE XML version.
pub fn page_type_known(type_name: &str, version: &FormatVersion) -> bool {
    let Some(index) = PAGE_VERSIONS.iter().position(|v| v == version) else {
        return false;
    };
    schema::type_since(type_name).is_some_and(|since| since <= index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{VariableType, VariableValue};

    #[test]
    fn test_unknown_type_yields_empty_map() {
        let model = FormatModel::new(FormatVersion::other("test"));
        let map = model.create_attributes("Nonexistent");
        assert!(map.is_empty());
        assert_eq!(map.type_name(), "Nonexistent");
    }

    #[test]
    fn test_created_attributes_are_independent() {
        let model = FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap();
        let mut a = model.create_attributes("TextRegion");
        let b = model.create_attributes("TextRegion");
        a.set("leading", 12).unwrap();
        assert_eq!(a.value("leading"), Some(&VariableValue::Integer(12)));
        assert!(b.value("leading").is_none());
        assert!(model.template("TextRegion").unwrap().value("leading").is_none());
    }

    #[test]
    fn test_script_constraint_changes_with_version() {
        let old = FormatModel::page_xml(&FormatVersion::PAGE_2013_07_15).unwrap();
        let new = FormatModel::page_xml(&FormatVersion::PAGE_2016_07_15).unwrap();

        let mut region = old.create_attributes("TextRegion");
        assert!(region.set("primaryScript", "Latin").is_ok());
        assert!(region.set("primaryScript", "Latn - Latin").is_err());

        let mut region = new.create_attributes("TextRegion");
        assert!(region.set("primaryScript", "Latn - Latin").is_ok());
        assert!(region.set("primaryScript", "Latin").is_err());
    }

    #[test]
    fn test_types_follow_schema_history() {
        let v2013 = FormatModel::page_xml(&FormatVersion::PAGE_2013_07_15).unwrap();
        assert!(v2013.knows_type("MusicRegion"));
        assert!(!v2013.knows_type("MapRegion"));
        assert!(!v2013.knows_type("Grapheme"));

        let v2019 = FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap();
        assert!(v2019.knows_type("CustomRegion"));
        assert!(v2019.knows_type("TableCellRole"));
        let conf = v2019.template("Word").and_then(|t| t.get("conf")).unwrap();
        assert_eq!(conf.kind(), VariableType::Double);
        assert!(conf.constraint().is_some());

        assert!(page_type_known("Grapheme", &FormatVersion::PAGE_2017_07_15));
        assert!(!page_type_known("Grapheme", &FormatVersion::PAGE_2016_07_15));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ModelRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), 8);
        assert!(registry.latest().is_some());
        assert!(registry.get(&FormatVersion::ALTO_V4).is_none());
        assert!(registry.require(&FormatVersion::ALTO_V4).is_err());
        assert_eq!(
            registry.versions().first(),
            Some(&FormatVersion::PAGE_2009_03_16)
        );
    }

    #[test]
    fn test_unknown_page_version() {
        let err = FormatModel::page_xml(&FormatVersion::page("2024-01-01")).unwrap_err();
        assert!(matches!(err, Error::UnknownFormatVersion(_)));
    }
}
