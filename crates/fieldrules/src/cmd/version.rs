use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("fieldrules {}", env!("CARGO_PKG_VERSION"));
    if !args.extended {
        return Ok(SUCCESS);
    }

    println!(
        "target: {}",
        option_env!("FIELDRULES_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "rule keywords: required, min, max, oneof, {}",
        fieldrules_tag::Format::ALL
            .iter()
            .map(|format| format.keyword())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "default limits: max_tag_len={}, max_oneof_members={}",
        fieldrules_tag::DEFAULT_MAX_TAG_LEN,
        fieldrules_tag::DEFAULT_MAX_ONEOF_MEMBERS
    );

    Ok(SUCCESS)
}
