use std::fmt;

use fieldrules_check::{FieldKind, Violation};
use fieldrules_tag::MalformedRuleError;
use serde::Serialize;

/// Registration-time contract violations.
///
/// These indicate a defect in startup code, never bad request input.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A rule tag could not be parsed.
    #[error("{type_name}.{field}: malformed rule tag `{tag}`: {source}")]
    Malformed {
        type_name: String,
        field: String,
        tag: String,
        #[source]
        source: MalformedRuleError,
    },

    /// The type already has a rule table.
    #[error("type {0} is already registered")]
    DuplicateType(String),

    /// A rule names a field the type does not have.
    #[error("type {type_name} has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    /// One registration lists the same field twice.
    #[error("{type_name}.{field}: field has more than one rule tag")]
    DuplicateField { type_name: String, field: String },

    /// A clause cannot apply to the field's declared kind.
    #[error("{type_name}.{field}: rule `{rule}` does not apply to {kind} fields")]
    KindMismatch {
        type_name: String,
        field: String,
        kind: FieldKind,
        rule: &'static str,
    },

    /// A rules document could not be read or has the wrong shape.
    #[error("failed to load rules: {0}")]
    Load(String),

    /// A rules document is not valid JSON.
    #[error("rules document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// One or more violated constraints, in field-then-rule registration order.
///
/// Never empty: a passing validation is `Ok(())`. Serializes as a plain list
/// of `{field, rule, message}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// `Ok(())` for an empty accumulator, otherwise the wrapped violations.
    pub fn check(violations: Vec<Violation>) -> std::result::Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations reported for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed: ")?;
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl IntoIterator for ValidationError {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
