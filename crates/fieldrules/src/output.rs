use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fieldrules_registry::{Registry, ValidationError, Violation};
use fieldrules_tag::FieldRuleSet;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ClauseOutput<'a> {
    rule: &'a str,
    args: &'a [String],
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    schema_id: &'a str,
    tag: &'a str,
    clauses: Vec<ClauseOutput<'a>>,
}

pub fn print_clauses(tag: &str, rules: &FieldRuleSet, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ParseOutput {
                schema_id: "https://schemas.3leaps.dev/fieldrules/cli/v1/parsed-tag.schema.json",
                tag,
                clauses: rules
                    .iter()
                    .map(|clause| ClauseOutput {
                        rule: clause.rule(),
                        args: clause.args(),
                    })
                    .collect(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "RULE", "ARGS"]);
            for (idx, clause) in rules.iter().enumerate() {
                table.add_row(vec![
                    (idx + 1).to_string(),
                    clause.rule().to_string(),
                    clause.args().join(", "),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (idx, clause) in rules.iter().enumerate() {
                println!("{}. {clause}", idx + 1);
            }
        }
        OutputFormat::Raw => println!("{rules}"),
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    schema_id: &'a str,
    type_name: &'a str,
    valid: bool,
    violations: &'a [Violation],
}

pub fn print_report(type_name: &str, result: &Result<(), ValidationError>, format: OutputFormat) {
    let violations: &[Violation] = match result {
        Ok(()) => &[],
        Err(err) => err.violations(),
    };

    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                schema_id: "https://schemas.3leaps.dev/fieldrules/cli/v1/validation-report.schema.json",
                type_name,
                valid: violations.is_empty(),
                violations,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            if violations.is_empty() {
                println!("{type_name}: valid");
                return;
            }
            let mut table = new_table(vec!["FIELD", "RULE", "MESSAGE"]);
            for v in violations {
                table.add_row(vec![v.field.as_str(), v.rule.as_str(), v.message.as_str()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => match result {
            Ok(()) => println!("{type_name}: valid"),
            Err(err) => println!("{type_name}: {err}"),
        },
        OutputFormat::Raw => {
            for v in violations {
                println!("{}\t{}\t{}", v.field, v.rule, v.message);
            }
        }
    }
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    field: &'a str,
    tag: &'a str,
}

#[derive(Serialize)]
struct TypeOutput<'a> {
    type_name: &'a str,
    fields: Vec<FieldOutput<'a>>,
}

#[derive(Serialize)]
struct TypesOutput<'a> {
    schema_id: &'a str,
    types: Vec<TypeOutput<'a>>,
}

pub fn print_types(registry: &Registry, format: OutputFormat) {
    let types: Vec<TypeOutput<'_>> = registry
        .types()
        .into_iter()
        .filter_map(|name| registry.lookup(name))
        .map(|table| TypeOutput {
            type_name: table.key().name(),
            fields: table
                .iter()
                .map(|entry| FieldOutput {
                    field: entry.name(),
                    tag: entry.tag(),
                })
                .collect(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&TypesOutput {
            schema_id: "https://schemas.3leaps.dev/fieldrules/cli/v1/rule-types.schema.json",
            types,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["TYPE", "FIELD", "TAG"]);
            for ty in &types {
                for field in &ty.fields {
                    table.add_row(vec![ty.type_name, field.field, field.tag]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for ty in &types {
                println!("{}", ty.type_name);
                for field in &ty.fields {
                    println!("  {:<24} {}", field.field, field.tag);
                }
            }
        }
        OutputFormat::Raw => {
            for ty in &types {
                println!("{}", ty.type_name);
            }
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
