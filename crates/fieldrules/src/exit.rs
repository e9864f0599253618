use std::fmt;

use fieldrules_registry::ConfigError;
use fieldrules_tag::MalformedRuleError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
/// The payload violated one or more rules.
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
/// The rules themselves are defective (sysexits `EX_CONFIG`).
pub const CONFIG_INVALID: i32 = 78;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: std::io::Error) -> CliError {
    let code = match err.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn rule_error(context: &str, err: MalformedRuleError) -> CliError {
    CliError::usage(format!("{context}: {err}"))
}

pub fn config_error(context: &str, err: ConfigError) -> CliError {
    CliError::new(CONFIG_INVALID, format!("{context}: {err}"))
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    let code = if err.is_io() { INTERNAL } else { DATA_INVALID };
    CliError::new(code, format!("{context}: {err}"))
}
