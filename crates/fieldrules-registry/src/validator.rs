use fieldrules_check::{evaluate, FieldKind, FieldValue, Violation};
use fieldrules_tag::{ClauseKind, FieldRuleSet};

use crate::error::ValidationError;
use crate::shape::FieldAccess;
use crate::table::TypeRuleTable;

/// Evaluate every constrained field of `instance` against `table`.
///
/// Violations are accumulated in field-then-rule registration order with no
/// reordering or deduplication.
pub(crate) fn validate_table<T>(table: &TypeRuleTable, instance: &T) -> Result<(), ValidationError>
where
    T: FieldAccess + ?Sized,
{
    let mut violations = Vec::new();
    for entry in table {
        // Registration checked the field exists; a missing accessor reads as unset.
        let value = instance.field(entry.name()).unwrap_or(FieldValue::Absent);
        debug_assert!(
            fits_declared(entry.kind(), &value),
            "{}.{} is declared {} but read as {}",
            table.key(),
            entry.name(),
            entry.kind(),
            value.kind_name()
        );
        check_field(entry.name(), entry.rules(), &value, &mut violations);
    }
    ValidationError::check(violations)
}

/// Declared kinds are fixed at registration; only `Any` fields vary at runtime.
fn fits_declared(declared: FieldKind, value: &FieldValue<'_>) -> bool {
    declared == FieldKind::Any || value.kind().is_none_or(|kind| kind == declared)
}

/// Run one field's rules, appending violations to `out`.
///
/// A failing `required` clause is the only violation reported for the field,
/// wherever it sits in the tag.
pub fn check_field(field: &str, rules: &FieldRuleSet, value: &FieldValue<'_>, out: &mut Vec<Violation>) {
    let required = rules
        .iter()
        .find(|clause| clause.kind() == ClauseKind::Required);
    if let Some(violation) = required.and_then(|clause| evaluate(field, clause, value)) {
        out.push(violation);
        return;
    }

    out.extend(
        rules
            .iter()
            .filter(|clause| clause.kind() != ClauseKind::Required)
            .filter_map(|clause| evaluate(field, clause, value)),
    );
}
