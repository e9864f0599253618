use fieldrules_check::FieldValue;
use serde_json::Value;

use crate::shape::FieldAccess;

/// A JSON object viewed as an instance of a record type.
///
/// Missing keys and `null` read as absent. A non-object value has no fields
/// at all, so every field reads as absent.
#[derive(Debug, Clone, Copy)]
pub struct JsonRecord<'a> {
    type_name: &'a str,
    value: &'a Value,
}

impl<'a> JsonRecord<'a> {
    pub fn new(type_name: &'a str, value: &'a Value) -> Self {
        Self { type_name, value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl FieldAccess for JsonRecord<'_> {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match self.value {
            Value::Object(map) => map.get(name).map_or(FieldValue::Absent, FieldValue::from_json),
            _ => FieldValue::Absent,
        };
        Some(value)
    }
}
