use fieldrules_tag::{ClauseKind, ConstraintClause, Format};

use crate::format::{is_email, is_jwt, is_uuid};
use crate::value::FieldValue;
use crate::violation::Violation;

/// Evaluate one clause against one field value.
///
/// Returns at most one violation. An absent value only fails `required`;
/// every other clause has nothing to inspect and passes.
pub fn evaluate(field: &str, clause: &ConstraintClause, value: &FieldValue<'_>) -> Option<Violation> {
    let message = match clause.kind() {
        ClauseKind::Required => check_required(value),
        _ if matches!(value, FieldValue::Absent) => None,
        ClauseKind::Min => clause.bound().and_then(|bound| check_bound(Bound::Min, bound, value)),
        ClauseKind::Max => clause.bound().and_then(|bound| check_bound(Bound::Max, bound, value)),
        ClauseKind::OneOf => check_one_of(clause.members(), value),
        ClauseKind::Format(format) => check_format(format, value),
    }?;

    Some(Violation::new(field, clause.rule(), message))
}

fn check_required(value: &FieldValue<'_>) -> Option<String> {
    value.is_zero().then(|| "is required".to_string())
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

impl Bound {
    fn rule(self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Bound::Min => "at least",
            Bound::Max => "at most",
        }
    }

    fn admits(self, actual: i128, bound: u64) -> bool {
        match self {
            Bound::Min => actual >= i128::from(bound),
            Bound::Max => actual <= i128::from(bound),
        }
    }

    fn admits_float(self, actual: f64, bound: u64) -> bool {
        // NaN fails both directions.
        match self {
            Bound::Min => actual >= bound as f64,
            Bound::Max => actual <= bound as f64,
        }
    }
}

fn check_bound(bound: Bound, limit: u64, value: &FieldValue<'_>) -> Option<String> {
    let phrase = bound.phrase();
    match value {
        FieldValue::Text(text) => {
            let len = text.chars().count();
            (!bound.admits(len as i128, limit))
                .then(|| format!("length must be {phrase} {limit} (got {len})"))
        }
        FieldValue::List(len) => (!bound.admits(*len as i128, limit))
            .then(|| format!("must contain {phrase} {limit} items (got {len})")),
        FieldValue::Int(n) => (!bound.admits(i128::from(*n), limit))
            .then(|| format!("must be {phrase} {limit} (got {n})")),
        FieldValue::UInt(n) => (!bound.admits(i128::from(*n), limit))
            .then(|| format!("must be {phrase} {limit} (got {n})")),
        FieldValue::Float(n) => (!bound.admits_float(*n, limit))
            .then(|| format!("must be {phrase} {limit} (got {n})")),
        other => Some(unsupported(other, bound.rule())),
    }
}

fn check_one_of(members: &[String], value: &FieldValue<'_>) -> Option<String> {
    let text = match value {
        FieldValue::Text(text) => (*text).to_string(),
        FieldValue::Int(n) => n.to_string(),
        FieldValue::UInt(n) => n.to_string(),
        other => return Some(unsupported(other, "oneof")),
    };

    if members.iter().any(|member| *member == text) {
        None
    } else {
        Some(format!("must be one of [{}]", members.join(" ")))
    }
}

fn check_format(format: Format, value: &FieldValue<'_>) -> Option<String> {
    let FieldValue::Text(text) = value else {
        return Some(unsupported(value, format.keyword()));
    };

    let (valid, expected) = match format {
        Format::Jwt => (is_jwt(text), "a well-formed JWT"),
        Format::Email => (is_email(text), "a valid email address"),
        Format::Uuid => (is_uuid(text), "a valid UUID"),
    };
    (!valid).then(|| format!("must be {expected}"))
}

fn unsupported(value: &FieldValue<'_>, rule: &str) -> String {
    format!("{} value does not support {rule}", value.kind_name())
}
