//! Validate command implementation.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use squarefit_core::PackingValidator;

use crate::input::{load_config, read_corner_sets};
use crate::output::{format_json, format_table_row, input_name, print_table_header};
use crate::ConfigArgs;

pub fn run(
    input: Option<String>,
    config: &ConfigArgs,
    json_output: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let validator = PackingValidator::new(config)?;
    let corner_sets = read_corner_sets(input.as_deref())?;

    let verdict = validator.validate(&corner_sets)?;
    let name = input_name(input.as_deref());

    if json_output {
        let report = json!({
            "input": name,
            "checked_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "side_length": config.side_length,
            "quant_scale": config.quant_scale,
            "verdict": verdict,
        });
        println!("{}", format_json(&report));
    } else {
        print_table_header();
        println!("{}", format_table_row(name, &verdict));
    }

    if strict && !verdict.is_accepted() {
        std::process::exit(1);
    }

    Ok(())
}
