use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod parse;
pub mod types;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a rule tag and print its clauses.
    Parse(ParseArgs),
    /// Validate a JSON payload against a rules file.
    Validate(ValidateArgs),
    /// List the types declared in a rules file.
    Types(TypesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Parse(args) => parse::run(args, format),
        Command::Validate(args) => validate::run(args, format),
        Command::Types(args) => types::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Rule tag, e.g. "required,max=255".
    pub tag: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rules file: a JSON object mapping type names to {field: tag} objects.
    #[arg(long, short = 'r', value_name = "FILE", env = "FIELDRULES_RULES")]
    pub rules: PathBuf,
    /// Type to validate the payload as.
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub type_name: String,
    /// Inline JSON payload.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON payload from a file ("-" for stdin).
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Rules file to inspect.
    #[arg(long, short = 'r', value_name = "FILE", env = "FIELDRULES_RULES")]
    pub rules: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
