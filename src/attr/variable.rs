//! Named, typed and optionally constrained value slots.

use super::{Constraint, VariableType, VariableValue};
use crate::error::{Error, Result};

/// A named attribute slot.
///
/// The declared type never changes. Assignments that do not fit the type or
/// the constraint fail and leave the current value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    kind: VariableType,
    value: Option<VariableValue>,
    constraint: Option<Constraint>,
}

impl Variable {
    /// Create an unset variable.
    pub fn new(name: impl Into<String>, kind: VariableType) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
            constraint: None,
        }
    }

    /// Attach a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Set an initial value, checked like [`Variable::set_value`].
    pub fn with_value(mut self, value: impl Into<VariableValue>) -> Result<Self> {
        self.set_value(value.into())?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableType {
        self.kind
    }

    pub fn value(&self) -> Option<&VariableValue> {
        self.value.as_ref()
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Whether a value is set.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Assign a value.
    ///
    /// Integers widen to doubles; no other coercion happens.
    pub fn set_value(&mut self, value: VariableValue) -> Result<()> {
        let value = self.coerce(value)?;
        if let Some(constraint) = &self.constraint {
            if !constraint.accepts(&value) {
                return Err(Error::ConstraintViolation {
                    name: self.name.clone(),
                    value: value.to_string(),
                });
            }
        }
        self.value = Some(value);
        Ok(())
    }

    /// Assign a value of the declared type without consulting the constraint.
    ///
    /// Used when restoring stored pages whose values predate the constraint.
    pub(crate) fn force_value(&mut self, value: VariableValue) -> Result<()> {
        self.value = Some(self.coerce(value)?);
        Ok(())
    }

    fn coerce(&self, value: VariableValue) -> Result<VariableValue> {
        let value = match (self.kind, value) {
            (VariableType::Double, VariableValue::Integer(i)) => VariableValue::Double(i as f64),
            (_, v) => v,
        };
        if value.variable_type() != self.kind {
            return Err(Error::WrongVariableType {
                name: self.name.clone(),
                expected: self.kind.name(),
                actual: value.variable_type().name(),
            });
        }
        Ok(value)
    }

    /// Parse attribute text according to the declared type and assign it.
    pub fn set_from_text(&mut self, text: &str) -> Result<()> {
        let value = VariableValue::parse(self.kind, text).ok_or_else(|| Error::WrongVariableType {
            name: self.name.clone(),
            expected: self.kind.name(),
            actual: "unparsable text",
        })?;
        self.set_value(value)
    }

    /// Clear the value.
    pub fn unset(&mut self) {
        self.value = None;
    }

    /// Replace the constraint without re-checking the current value.
    pub fn replace_constraint(&mut self, constraint: Option<Constraint>) {
        self.constraint = constraint;
    }

    /// Convenience accessor for string values.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(VariableValue::as_str)
    }

    /// Overwrite a string value in place, bypassing the constraint.
    ///
    /// Used by format conversion where the target constraint is adopted
    /// afterwards.
    pub(crate) fn force_string(&mut self, s: String) {
        if self.kind == VariableType::String {
            self.value = Some(VariableValue::String(s));
        }
    }
}
