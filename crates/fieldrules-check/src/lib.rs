//! Stateless constraint evaluators.
//!
//! Each evaluator checks one parsed [`ConstraintClause`] against one runtime
//! [`FieldValue`] and yields at most one [`Violation`]. Evaluators never log
//! and never fail: a value either satisfies the clause or it does not.
//!
//! [`ConstraintClause`]: fieldrules_tag::ConstraintClause

pub mod evaluate;
pub mod format;
pub mod value;
pub mod violation;

pub use evaluate::evaluate;
pub use format::{is_email, is_jwt, is_uuid};
pub use value::{
    BoolSource, FieldKind, FieldValue, FloatSource, IntSource, ListSource, TextSource, UIntSource,
};
pub use violation::Violation;
