use std::fmt;

use serde::{Deserialize, Serialize};

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field name as registered.
    pub field: String,
    /// Rule keyword that failed (`"required"`, `"max"`, `"oneof"`, ...).
    pub rule: String,
    /// Human-readable detail, e.g. `"length must be at most 255 (got 256)"`.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.rule, self.message)
    }
}
