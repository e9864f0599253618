use crate::cmd::ParseArgs;
use crate::exit::{rule_error, CliResult, SUCCESS};
use crate::output::{print_clauses, OutputFormat};

pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let rules = fieldrules_tag::parse(&args.tag).map_err(|err| rule_error("invalid tag", err))?;
    tracing::debug!(tag = %args.tag, clauses = rules.len(), "parsed rule tag");
    print_clauses(&args.tag, &rules, format);
    Ok(SUCCESS)
}
