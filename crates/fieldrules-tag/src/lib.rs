//! Constraint tag grammar for declarative field validation.
//!
//! A tag is a short comma-separated rule string attached to one field:
//!
//! ```text
//! required,max=255
//! required,oneof=audio,video,screenshare
//! ```
//!
//! [`parse`] turns a tag into an ordered [`FieldRuleSet`]. The parser is total:
//! it either accepts the whole tag or returns a [`MalformedRuleError`], never a
//! partial clause list.

pub mod clause;
pub mod error;
pub mod parser;

pub use clause::{ClauseKind, ConstraintClause, FieldRuleSet, Format};
pub use error::{MalformedRuleError, Result};
pub use parser::{parse, parse_with, ParseLimits, DEFAULT_MAX_ONEOF_MEMBERS, DEFAULT_MAX_TAG_LEN};
