use fieldrules_check::FieldKind;
use fieldrules_tag::FieldRuleSet;

use crate::shape::TypeKey;

/// Parsed rules for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    name: String,
    kind: FieldKind,
    tag: String,
    rules: FieldRuleSet,
}

impl FieldRules {
    pub(crate) fn new(name: String, kind: FieldKind, tag: String, rules: FieldRuleSet) -> Self {
        Self {
            name,
            kind,
            tag,
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind; `Any` for record types.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The tag text this entry was parsed from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rules(&self) -> &FieldRuleSet {
        &self.rules
    }
}

/// Field rules for one registered type, in registration order.
///
/// Built once during initialization and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRuleTable {
    key: TypeKey,
    fields: Vec<FieldRules>,
}

impl TypeRuleTable {
    pub(crate) fn new(key: TypeKey, fields: Vec<FieldRules>) -> Self {
        Self { key, fields }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Rules for `field`, if the type constrains it.
    pub fn get(&self, field: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|entry| entry.name == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldRules> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a TypeRuleTable {
    type Item = &'a FieldRules;
    type IntoIter = std::slice::Iter<'a, FieldRules>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
