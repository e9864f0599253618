//! Declarative per-field validation rules for request and event payloads.
//!
//! Types register short rule tags per field once at startup
//! (`"required,max=255"`, `"required,oneof=audio,video"`, `"required,jwt"`);
//! request handlers then validate decoded payloads against the frozen registry.
//!
//! # Crate Structure
//!
//! - [`tag`]: Rule tag grammar and parser
//! - [`check`]: Stateless constraint evaluators
//! - [`registry`]: Type registry, validation executor and error types
//!
//! The most used items are re-exported at the crate root.

/// Re-export tag parser types.
pub mod tag {
    pub use fieldrules_tag::*;
}

/// Re-export evaluator types.
pub mod check {
    pub use fieldrules_check::*;
}

/// Re-export registry types.
pub mod registry {
    pub use fieldrules_registry::*;
}

pub use fieldrules_registry::{
    message_shape, ConfigError, FieldAccess, FieldDef, FieldKind, FieldValue, JsonRecord,
    Registry, RegistryBuilder, RegistryConfig, Schema, TypeKey, ValidationError, Violation,
};
pub use fieldrules_tag::{parse, FieldRuleSet, MalformedRuleError};
