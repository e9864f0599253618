use std::collections::HashMap;
use std::path::Path;

use fieldrules_check::FieldKind;
use fieldrules_tag::parse_with;
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::{ConfigError, Result, ValidationError};
use crate::rules::{parse_document, read_rules_file};
use crate::shape::{FieldAccess, Schema, TypeKey};
use crate::table::{FieldRules, TypeRuleTable};
use crate::validator::validate_table;

/// Collects rule tables during the single-threaded initialization phase.
///
/// Consumed by [`build`](Self::build), after which no further registration is
/// possible.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    tables: HashMap<TypeKey, TypeRuleTable>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create an empty builder with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty builder with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            tables: HashMap::new(),
            config,
        }
    }

    /// Register field rules for a compiled type.
    ///
    /// `rules` pairs field names with tags; their order is evaluation order.
    ///
    /// # Panics
    ///
    /// Panics on any [`ConfigError`]: a malformed tag, a field missing from
    /// `T`'s shape, a clause that cannot apply to the field's kind, or a second
    /// registration of `T`. These are startup defects and the process must not
    /// go on to serve requests.
    pub fn register<T: Schema>(&mut self, rules: &[(&str, &str)]) -> &mut Self {
        if let Err(err) = self.try_register::<T>(rules) {
            panic!("invalid validation rules: {err}");
        }
        self
    }

    /// Fallible form of [`register`](Self::register).
    pub fn try_register<T: Schema>(&mut self, rules: &[(&str, &str)]) -> Result<&mut Self> {
        let kind_of = |field: &str| T::field_def(field).map(|def| def.kind);
        let table = self.prepare(TypeKey::of::<T>(), kind_of, rules.iter().copied())?;
        self.commit(table);
        Ok(self)
    }

    /// Register field rules for a record type known only by name.
    ///
    /// Record types have no declared shape: every field named in `rules`
    /// exists and has kind [`FieldKind::Any`].
    pub fn try_register_record<I, F, G>(&mut self, name: impl Into<String>, rules: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (F, G)>,
        F: AsRef<str>,
        G: AsRef<str>,
    {
        let table = self.prepare(TypeKey::named(name), |_| Some(FieldKind::Any), rules)?;
        self.commit(table);
        Ok(self)
    }

    /// Register every record type declared in a JSON rules document.
    ///
    /// Returns the number of types registered. Nothing is registered unless
    /// every record in the document is valid.
    pub fn load_rules_json(&mut self, json: &str) -> Result<usize> {
        let tables = parse_document(json, &self.config)?
            .into_iter()
            .map(|record| {
                self.prepare(
                    TypeKey::named(record.name),
                    |_| Some(FieldKind::Any),
                    record.fields,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let count = tables.len();
        for table in tables {
            self.commit(table);
        }
        Ok(count)
    }

    /// Register every record type declared in a JSON rules file.
    pub fn load_rules_file(&mut self, path: &Path) -> Result<usize> {
        let content = read_rules_file(path, &self.config)?;
        let count = self.load_rules_json(&content)?;
        debug!(?path, types = count, "loaded rules file");
        Ok(count)
    }

    /// Check if a type has been registered.
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.tables.contains_key(type_name)
    }

    /// Freeze the registered tables for the serving phase.
    pub fn build(self) -> Registry {
        info!(types = self.tables.len(), "validation registry ready");
        Registry {
            tables: self.tables,
            config: self.config,
        }
    }

    fn prepare<K, I, F, G>(&self, key: TypeKey, kind_of: K, rules: I) -> Result<TypeRuleTable>
    where
        K: Fn(&str) -> Option<FieldKind>,
        I: IntoIterator<Item = (F, G)>,
        F: AsRef<str>,
        G: AsRef<str>,
    {
        if self.tables.contains_key(&key) {
            return Err(ConfigError::DuplicateType(key.to_string()));
        }

        let limits = self.config.parse_limits();
        let mut fields: Vec<FieldRules> = Vec::new();

        for (field, tag) in rules {
            let (field, tag) = (field.as_ref(), tag.as_ref());
            let kind = kind_of(field).ok_or_else(|| ConfigError::UnknownField {
                type_name: key.to_string(),
                field: field.to_string(),
            })?;
            if fields.iter().any(|entry| entry.name() == field) {
                return Err(ConfigError::DuplicateField {
                    type_name: key.to_string(),
                    field: field.to_string(),
                });
            }

            let parsed = parse_with(tag, &limits).map_err(|source| ConfigError::Malformed {
                type_name: key.to_string(),
                field: field.to_string(),
                tag: tag.to_string(),
                source,
            })?;
            if let Some(clause) = parsed.iter().find(|clause| !kind.supports(clause.kind())) {
                return Err(ConfigError::KindMismatch {
                    type_name: key.to_string(),
                    field: field.to_string(),
                    kind,
                    rule: clause.rule(),
                });
            }

            fields.push(FieldRules::new(
                field.to_string(),
                kind,
                tag.to_string(),
                parsed,
            ));
        }

        Ok(TypeRuleTable::new(key, fields))
    }

    fn commit(&mut self, table: TypeRuleTable) {
        debug!(type_name = %table.key(), fields = table.len(), "registered validation rules");
        self.tables.insert(table.key().clone(), table);
    }
}

/// Immutable rule tables for the serving phase.
///
/// `Registry` is `Send + Sync` and holds no locks; share it as
/// `Arc<Registry>` across request handlers and call [`validate`](Self::validate)
/// directly on any thread or task.
#[derive(Debug, Default)]
pub struct Registry {
    tables: HashMap<TypeKey, TypeRuleTable>,
    config: RegistryConfig,
}

impl Registry {
    /// Start an initialization phase with default config.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Rule table for a type name. `None` means the type opted out of validation.
    pub fn lookup(&self, type_name: &str) -> Option<&TypeRuleTable> {
        self.tables.get(type_name)
    }

    /// Rule table for a compiled type.
    pub fn lookup_type<T: Schema>(&self) -> Option<&TypeRuleTable> {
        self.lookup(T::NAME)
    }

    /// Validate one instance against its type's rules.
    ///
    /// Unregistered types pass trivially. Otherwise every constrained field is
    /// checked and all violations are returned together.
    pub fn validate<T>(&self, instance: &T) -> std::result::Result<(), ValidationError>
    where
        T: FieldAccess + ?Sized,
    {
        match self.lookup(instance.type_name()) {
            Some(table) => validate_table(table, instance),
            None => Ok(()),
        }
    }

    /// Check if a type has registered rules.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.tables.contains_key(type_name)
    }

    /// Get registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.tables.keys().map(TypeKey::name).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fieldrules_tag::MalformedRuleError;
    use serde_json::json;

    use super::*;
    use crate::record::JsonRecord;

    struct Ping {
        nonce: String,
        attempts: u32,
        urgent: bool,
    }

    crate::message_shape!(Ping as "Ping" {
        nonce: Text,
        attempts: UInt,
        urgent: Bool,
    });

    fn ping(nonce: &str, attempts: u32) -> Ping {
        Ping {
            nonce: nonce.to_string(),
            attempts,
            urgent: false,
        }
    }

    #[test]
    fn register_and_validate() {
        let mut builder = RegistryBuilder::new();
        builder.register::<Ping>(&[("nonce", "required,max=8"), ("attempts", "max=3")]);
        let registry = builder.build();

        assert!(registry.validate(&ping("abc", 1)).is_ok());

        let err = registry.validate(&ping("", 9)).unwrap_err();
        let pairs: Vec<(&str, &str)> = err
            .violations()
            .iter()
            .map(|v| (v.field.as_str(), v.rule.as_str()))
            .collect();
        assert_eq!(pairs, vec![("nonce", "required"), ("attempts", "max")]);
    }

    #[test]
    fn unregistered_type_passes_through() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.lookup_type::<Ping>().is_none());
        assert!(registry.validate(&ping("", 99)).is_ok());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut builder = RegistryBuilder::new();
        builder.try_register::<Ping>(&[("nonce", "required")]).unwrap();
        assert!(matches!(
            builder.try_register::<Ping>(&[("attempts", "max=3")]),
            Err(ConfigError::DuplicateType(name)) if name == "Ping"
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut builder = RegistryBuilder::new();
        assert!(matches!(
            builder.try_register::<Ping>(&[("nonse", "required")]),
            Err(ConfigError::UnknownField { field, .. }) if field == "nonse"
        ));
        assert!(!builder.is_registered("Ping"));
    }

    #[test]
    fn malformed_tag_is_rejected() {
        let mut builder = RegistryBuilder::new();
        let result = builder.try_register::<Ping>(&[("nonce", "oneof=x,required")]);
        assert!(matches!(
            result,
            Err(ConfigError::Malformed {
                source: MalformedRuleError::OneOfNotLast { .. },
                ..
            })
        ));
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let mut builder = RegistryBuilder::new();
        assert!(matches!(
            builder.try_register::<Ping>(&[("urgent", "max=1")]),
            Err(ConfigError::KindMismatch { rule: "max", kind: FieldKind::Bool, .. })
        ));
        assert!(matches!(
            builder.try_register::<Ping>(&[("attempts", "jwt")]),
            Err(ConfigError::KindMismatch { rule: "jwt", .. })
        ));
        builder.register::<Ping>(&[("urgent", "required")]);
    }

    struct Invite {
        emails: Vec<String>,
    }

    impl FieldAccess for Invite {
        fn type_name(&self) -> &str {
            "Invite"
        }

        fn field(&self, name: &str) -> Option<crate::FieldValue<'_>> {
            (name == "emails").then(|| crate::FieldValue::list(&self.emails))
        }
    }

    impl Schema for Invite {
        const NAME: &'static str = "Invite";
        const FIELDS: &'static [crate::FieldDef] =
            &[crate::FieldDef::new("emails", FieldKind::Text)];
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Invite.emails is declared text but read as list")]
    fn accessor_kind_drift_is_not_reported_as_violation() {
        let mut builder = RegistryBuilder::new();
        builder.register::<Invite>(&[("emails", "oneof=a,b")]);
        let invite = Invite {
            emails: vec!["a".to_string()],
        };
        let _ = builder.build().validate(&invite);
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let mut builder = RegistryBuilder::new();
        assert!(matches!(
            builder.try_register::<Ping>(&[("nonce", "required"), ("nonce", "max=3")]),
            Err(ConfigError::DuplicateField { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "invalid validation rules")]
    fn register_panics_on_config_error() {
        let mut builder = RegistryBuilder::new();
        builder.register::<Ping>(&[("nonce", "requird")]);
    }

    #[test]
    fn tag_limits_follow_config() {
        let mut builder = RegistryBuilder::with_config(RegistryConfig {
            max_tag_len: 4,
            ..RegistryConfig::default()
        });
        assert!(matches!(
            builder.try_register::<Ping>(&[("nonce", "required")]),
            Err(ConfigError::Malformed {
                source: MalformedRuleError::TooLong { .. },
                ..
            })
        ));
    }

    #[test]
    fn records_from_json_document() {
        let mut builder = RegistryBuilder::new();
        let count = builder
            .load_rules_json(r#"{"StartRecording": {"call_id": "required,max=4", "mode": "oneof=audio,video"}}"#)
            .unwrap();
        assert_eq!(count, 1);
        let registry = builder.build();

        let ok = json!({"call_id": "c1", "mode": "video"});
        assert!(registry.validate(&JsonRecord::new("StartRecording", &ok)).is_ok());

        let bad = json!({"mode": "VIDEO"});
        let err = registry
            .validate(&JsonRecord::new("StartRecording", &bad))
            .unwrap_err();
        let rules: Vec<&str> = err.violations().iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["required", "oneof"]);
    }

    #[test]
    fn rules_document_registers_all_or_nothing() {
        let mut builder = RegistryBuilder::new();
        builder.register::<Ping>(&[("nonce", "required")]);

        let bad_tag = r#"{"A": {"x": "required"}, "B": {"y": "max=two"}}"#;
        assert!(matches!(
            builder.load_rules_json(bad_tag),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(!builder.is_registered("A"));

        let clashing = r#"{"C": {"x": "required"}, "Ping": {"nonce": "max=3"}}"#;
        assert!(matches!(
            builder.load_rules_json(clashing),
            Err(ConfigError::DuplicateType(name)) if name == "Ping"
        ));
        assert!(!builder.is_registered("C"));

        assert_eq!(builder.load_rules_json(r#"{"A": {"x": "required"}}"#).unwrap(), 1);
        assert_eq!(builder.build().types(), vec!["A", "Ping"]);
    }

    #[test]
    fn record_and_compiled_types_share_namespace() {
        let mut builder = RegistryBuilder::new();
        builder.register::<Ping>(&[("nonce", "required")]);
        assert!(matches!(
            builder.try_register_record("Ping", [("nonce", "max=3")]),
            Err(ConfigError::DuplicateType(_))
        ));
    }

    #[test]
    fn rules_file_loads_and_enforces_size() {
        let dir = make_temp_dir("rules-file");
        let path = dir.join("rules.json");
        std::fs::write(&path, r#"{"A": {"x": "required"}, "B": {"y": "max=2"}}"#).unwrap();

        let mut builder = RegistryBuilder::new();
        assert_eq!(builder.load_rules_file(&path).unwrap(), 2);
        let registry = builder.build();
        assert_eq!(registry.types(), vec!["A", "B"]);
        assert_eq!(registry.len(), 2);

        let mut small = RegistryBuilder::with_config(RegistryConfig {
            max_rules_file_size: 8,
            ..RegistryConfig::default()
        });
        assert!(matches!(
            small.load_rules_file(&path),
            Err(ConfigError::Load(_))
        ));

        let mut missing = RegistryBuilder::new();
        assert!(matches!(
            missing.load_rules_file(&dir.join("absent.json")),
            Err(ConfigError::Load(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn config_access() {
        let config = RegistryConfig {
            max_oneof_members: 3,
            ..RegistryConfig::default()
        };
        let registry = RegistryBuilder::with_config(config).build();
        assert_eq!(registry.config(), &config);
        assert!(registry.is_empty());
    }

    fn make_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fieldrules-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
