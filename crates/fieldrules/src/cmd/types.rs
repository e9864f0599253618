use fieldrules_registry::RegistryBuilder;

use crate::cmd::TypesArgs;
use crate::exit::{config_error, CliResult, SUCCESS};
use crate::output::{print_types, OutputFormat};

pub fn run(args: TypesArgs, format: OutputFormat) -> CliResult<i32> {
    let mut builder = RegistryBuilder::new();
    builder
        .load_rules_file(&args.rules)
        .map_err(|err| config_error("invalid rules", err))?;
    let registry = builder.build();

    print_types(&registry, format);
    Ok(SUCCESS)
}
