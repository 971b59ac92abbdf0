//! Value constraints attached to variables.

use super::VariableValue;
use crate::error::{Error, Result};
use regex::Regex;

/// Restriction on the values a variable accepts.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Only the listed strings are accepted.
    ValidValues(Vec<String>),
    /// Numeric value within inclusive bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// String value fully matching a regular expression.
    Pattern(Regex),
}

impl Constraint {
    /// Allowed-value constraint from a list of strings.
    pub fn valid_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::ValidValues(values.into_iter().map(Into::into).collect())
    }

    /// Inclusive numeric range.
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Constraint::Range { min, max }
    }

    /// Pattern constraint. The expression is anchored at both ends.
    pub fn pattern(expr: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{})$", expr))
            .map(Constraint::Pattern)
            .map_err(|e| Error::Other(format!("invalid pattern '{}': {}", expr, e)))
    }

    /// Check whether a value passes this constraint.
    ///
    /// Values of a kind the constraint does not speak about are accepted.
    pub fn accepts(&self, value: &VariableValue) -> bool {
        match self {
            Constraint::ValidValues(allowed) => match value.as_str() {
                Some(s) => allowed.iter().any(|a| a == s),
                None => true,
            },
            Constraint::Range { min, max } => match value.as_f64() {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => true,
            },
            Constraint::Pattern(re) => match value.as_str() {
                Some(s) => re.is_match(s),
                None => true,
            },
        }
    }

    /// Allowed values, for a valid-values constraint.
    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            Constraint::ValidValues(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constraint::ValidValues(a), Constraint::ValidValues(b)) => a == b,
            (
                Constraint::Range { min: a, max: b },
                Constraint::Range { min: c, max: d },
            ) => a == c && b == d,
            (Constraint::Pattern(a), Constraint::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
