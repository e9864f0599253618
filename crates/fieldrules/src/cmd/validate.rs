use std::io::Read;
use std::path::Path;

use fieldrules_registry::{JsonRecord, RegistryBuilder};
use serde_json::Value;

use crate::cmd::ValidateArgs;
use crate::exit::{
    config_error, io_error, json_error, CliError, CliResult, DATA_INVALID, SUCCESS,
};
use crate::output::{print_report, OutputFormat};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let mut builder = RegistryBuilder::new();
    builder
        .load_rules_file(&args.rules)
        .map_err(|err| config_error("invalid rules", err))?;
    let registry = builder.build();

    if !registry.has_type(&args.type_name) {
        return Err(CliError::usage(format!(
            "type {} is not declared in {}",
            args.type_name,
            args.rules.display()
        )));
    }

    let raw = read_payload(&args)?;
    let payload: Value = serde_json::from_str(&raw).map_err(|err| json_error("invalid payload", err))?;
    if !payload.is_object() {
        return Err(CliError::new(
            DATA_INVALID,
            "invalid payload: expected a JSON object",
        ));
    }

    let result = registry.validate(&JsonRecord::new(&args.type_name, &payload));
    print_report(&args.type_name, &result, format);

    match result {
        Ok(()) => Ok(SUCCESS),
        Err(err) => {
            tracing::info!(type_name = %args.type_name, violations = err.len(), "payload rejected");
            Ok(DATA_INVALID)
        }
    }
}

fn read_payload(args: &ValidateArgs) -> CliResult<String> {
    match (&args.json, &args.file) {
        (Some(json), _) => Ok(json.clone()),
        (None, Some(path)) if path == Path::new("-") => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|err| io_error("failed reading stdin", err))?;
            Ok(content)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        (None, None) => Err(CliError::usage("one of --json or --file is required")),
    }
}
