//! Typed attribute values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    String,
    Integer,
    Double,
    Boolean,
}

impl VariableType {
    /// Lowercase type name.
    pub fn name(&self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Integer => "integer",
            VariableType::Double => "double",
            VariableType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl VariableValue {
    /// Type of this value.
    pub fn variable_type(&self) -> VariableType {
        match self {
            VariableValue::String(_) => VariableType::String,
            VariableValue::Integer(_) => VariableType::Integer,
            VariableValue::Double(_) => VariableType::Double,
            VariableValue::Boolean(_) => VariableType::Boolean,
        }
    }

    /// Parse attribute text as a value of the given type.
    pub fn parse(kind: VariableType, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            VariableType::String => Some(VariableValue::String(text.to_string())),
            VariableType::Integer => text.parse().ok().map(VariableValue::Integer),
            VariableType::Double => text.parse().ok().map(VariableValue::Double),
            VariableType::Boolean => match text {
                "true" | "1" => Some(VariableValue::Boolean(true)),
                "false" | "0" => Some(VariableValue::Boolean(false)),
                _ => None,
            },
        }
    }

    /// String content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VariableValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            VariableValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric content of integer and double values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            VariableValue::Integer(i) => Some(*i as f64),
            VariableValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariableValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::String(s) => f.write_str(s),
            VariableValue::Integer(i) => write!(f, "{}", i),
            VariableValue::Double(d) => write!(f, "{}", d),
            VariableValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::String(s.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(s: String) -> Self {
        VariableValue::String(s)
    }
}

impl From<i64> for VariableValue {
    fn from(i: i64) -> Self {
        VariableValue::Integer(i)
    }
}

impl From<i32> for VariableValue {
    fn from(i: i32) -> Self {
        VariableValue::Integer(i.into())
    }
}

impl From<f64> for VariableValue {
    fn from(d: f64) -> Self {
        VariableValue::Double(d)
    }
}

impl From<bool> for VariableValue {
    fn from(b: bool) -> Self {
        VariableValue::Boolean(b)
    }
}
