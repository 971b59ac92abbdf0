//! Ordered attribute bags.

use super::{Variable, VariableValue};
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Ordered mapping of attribute name to [`Variable`], tagged with the name of
/// the content type that owns it (e.g. `TextRegion`).
///
/// `Clone` is a deep copy: templates are cloned into every new object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableMap {
    type_name: String,
    vars: IndexMap<String, Variable>,
}

impl VariableMap {
    /// Create an empty map for the given owning type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            vars: IndexMap::new(),
        }
    }

    /// Owning content type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Re-tag the map with another owning type.
    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.vars.get_mut(name)
    }

    /// Look up a variable by position.
    pub fn get_index(&self, index: usize) -> Option<&Variable> {
        self.vars.get_index(index).map(|(_, v)| v)
    }

    /// Current value of a variable, if present and set.
    pub fn value(&self, name: &str) -> Option<&VariableValue> {
        self.get(name).and_then(Variable::value)
    }

    /// Current string value of a variable.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Variable::as_str)
    }

    /// Assign a value to an existing variable.
    pub fn set(&mut self, name: &str, value: impl Into<VariableValue>) -> Result<()> {
        let owner = &self.type_name;
        match self.vars.get_mut(name) {
            Some(var) => var.set_value(value.into()),
            None => Err(Error::UnknownAttribute {
                owner: owner.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Insert a variable. A variable with the same name is replaced in place.
    pub fn insert(&mut self, var: Variable) {
        self.vars.insert(var.name().to_string(), var);
    }

    /// Remove a variable by name, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.vars.shift_remove(name)
    }

    /// Remove a variable by position.
    pub fn remove_index(&mut self, index: usize) -> Option<Variable> {
        self.vars.shift_remove_index(index).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }

    /// Mutable iteration in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Variable> {
        self.vars.values_mut()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Keep only the variables for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&Variable) -> bool) {
        self.vars.retain(|_, v| keep(v));
    }
}

impl<'a> IntoIterator for &'a VariableMap {
    type Item = &'a Variable;
    type IntoIter = indexmap::map::Values<'a, String, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{Constraint, VariableType};

    fn sample() -> VariableMap {
        let mut map = VariableMap::new("TextRegion");
        map.insert(Variable::new("type", VariableType::String));
        map.insert(Variable::new("leading", VariableType::Integer));
        map.insert(
            Variable::new("conf", VariableType::Double)
                .with_constraint(Constraint::range(Some(0.0), Some(1.0))),
        );
        map
    }

    #[test]
    fn test_lookup_by_name_and_index() {
        let map = sample();
        assert_eq!(map.get("leading").map(|v| v.kind()), Some(VariableType::Integer));
        assert_eq!(map.get_index(0).map(|v| v.name()), Some("type"));
        assert!(map.get("missing").is_none());
        assert!(map.get_index(3).is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map = sample();
        assert!(map.remove("type").is_some());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["leading", "conf"]);
        assert!(map.remove_index(1).is_some());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["leading"]);
    }

    #[test]
    fn test_set_unknown_attribute() {
        let mut map = sample();
        let err = map.set("nope", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }));
        map.set("conf", 0.5).unwrap();
        assert_eq!(map.value("conf"), Some(&VariableValue::Double(0.5)));
    }

    #[test]
    fn test_clone_is_deep() {
        let template = sample();
        let mut copy = template.clone();
        copy.set("leading", 4).unwrap();
        copy.get_mut("conf").unwrap().replace_constraint(None);

        assert!(template.value("leading").is_none());
        assert!(template.get("conf").unwrap().constraint().is_some());
    }
}
