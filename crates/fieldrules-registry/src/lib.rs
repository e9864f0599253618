//! Type registry and validation executor for declarative field rules.
//!
//! Validation runs in two strictly ordered phases:
//!
//! 1. **Initialization.** A [`RegistryBuilder`] collects one rule table per
//!    type. Malformed tags, unknown fields and duplicate registrations are
//!    startup defects: [`RegistryBuilder::register`] panics on them.
//! 2. **Serving.** [`RegistryBuilder::build`] freezes the tables into an
//!    immutable [`Registry`], typically shared as `Arc<Registry>`.
//!    [`Registry::validate`] is a pure, lock-free function of the registry and
//!    one instance; failures come back as a [`ValidationError`].
//!
//! ```
//! use fieldrules_registry::{message_shape, RegistryBuilder};
//!
//! struct JoinCallRequest {
//!     call_id: String,
//!     token: String,
//! }
//!
//! message_shape!(JoinCallRequest as "JoinCallRequest" {
//!     call_id: Text,
//!     token: Text,
//! });
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register::<JoinCallRequest>(&[("call_id", "required,max=64")]);
//! let registry = builder.build();
//!
//! let request = JoinCallRequest { call_id: String::new(), token: String::new() };
//! let err = registry.validate(&request).unwrap_err();
//! assert_eq!(err.violations()[0].rule, "required");
//! ```

pub mod config;
pub mod error;
pub mod record;
pub mod registry;
mod rules;
pub mod shape;
pub mod table;
pub mod validator;

pub use config::RegistryConfig;
pub use error::{ConfigError, Result, ValidationError};
pub use record::JsonRecord;
pub use registry::{Registry, RegistryBuilder};
pub use shape::{FieldAccess, FieldDef, Schema, TypeKey};
pub use table::{FieldRules, TypeRuleTable};
pub use validator::check_field;

pub use fieldrules_check::{FieldKind, FieldValue, Violation};
