use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::RegistryConfig;
use crate::error::{ConfigError, Result};

/// Field rules for one record type declared in a rules document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordRules {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

/// Parse a rules document:
///
/// ```json
/// { "JoinCallRequest": { "call_id": "required,max=64", "token": "required,jwt" } }
/// ```
///
/// Type and field order follow the document.
pub(crate) fn parse_document(json: &str, config: &RegistryConfig) -> Result<Vec<RecordRules>> {
    let doc: Value = serde_json::from_str(json)?;
    let Value::Object(types) = doc else {
        return Err(ConfigError::Load(
            "rules document must be a JSON object keyed by type name".to_string(),
        ));
    };

    if types.len() > config.max_types_from_file {
        return Err(ConfigError::Load(format!(
            "type count exceeds configured max ({}): {}",
            config.max_types_from_file,
            types.len()
        )));
    }

    types
        .into_iter()
        .map(|(name, fields)| match fields {
            Value::Object(fields) => Ok(RecordRules {
                fields: parse_fields(&name, fields)?,
                name,
            }),
            _ => Err(ConfigError::Load(format!(
                "type {name}: expected an object of field rule tags"
            ))),
        })
        .collect()
}

fn parse_fields(type_name: &str, fields: Map<String, Value>) -> Result<Vec<(String, String)>> {
    fields
        .into_iter()
        .map(|(field, tag)| match tag {
            Value::String(tag) => Ok((field, tag)),
            _ => Err(ConfigError::Load(format!(
                "{type_name}.{field}: rule tag must be a string"
            ))),
        })
        .collect()
}

/// Read a rules file, refusing anything larger than the configured limit.
pub(crate) fn read_rules_file(path: &Path, config: &RegistryConfig) -> Result<String> {
    let file = std::fs::File::open(path)
        .map_err(|err| ConfigError::Load(format!("failed opening {}: {err}", path.display())))?;
    let metadata = file
        .metadata()
        .map_err(|err| ConfigError::Load(err.to_string()))?;
    if !metadata.is_file() {
        return Err(ConfigError::Load(format!(
            "not a regular file: {}",
            path.display()
        )));
    }

    let max_bytes = config.max_rules_file_size;
    if metadata.len() > max_bytes as u64 {
        return Err(ConfigError::Load(format!(
            "rules file too large ({} bytes): {}",
            metadata.len(),
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| ConfigError::Load(format!("failed reading {}: {err}", path.display())))?;
    if content.len() > max_bytes {
        return Err(ConfigError::Load(format!(
            "rules file too large while reading: {}",
            path.display()
        )));
    }

    Ok(content)
}
