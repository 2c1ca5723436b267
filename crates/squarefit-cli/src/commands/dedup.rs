//! Dedup command implementation.

use serde_json::json;
use squarefit_canonical::InstanceId;
use squarefit_core::{DuplicateKey, MemoryIndex, PackingValidator, Verdict};

use crate::input::{load_config, read_corner_sets};
use crate::output::{format_json, format_table_row, print_table_header};
use crate::ConfigArgs;

pub fn run(
    inputs: Vec<String>,
    config: &ConfigArgs,
    instance: String,
    by_hash: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let instance =
        InstanceId::parse(instance).map_err(|e| format!("Invalid instance ID: {}", e))?;
    let key = if by_hash {
        DuplicateKey::ContentHash
    } else {
        DuplicateKey::ObjectiveValue
    };
    let validator = PackingValidator::new(config)?.with_duplicate_key(key);
    let index = MemoryIndex::new();

    let mut results = Vec::new();
    for path in &inputs {
        let corner_sets = read_corner_sets(Some(path))?;
        let mut verdict = validator.validate_against(&corner_sets, &instance, &index)?;
        if let Verdict::Accepted(accepted) = &verdict {
            let objective = accepted.objective_value.to_quantity()?;
            let claimed = index.claim(
                &instance,
                validator.duplicate_key(),
                accepted.square_count,
                &objective,
                &accepted.content_hash,
            )?;
            if !claimed {
                log::debug!("{}: key taken while claiming, re-checking", path);
                verdict = validator.validate_against(&corner_sets, &instance, &index)?;
            }
        }
        results.push((path.as_str(), verdict));
    }

    if json_output {
        let report: Vec<_> = results
            .iter()
            .map(|(path, verdict)| json!({ "input": path, "verdict": verdict }))
            .collect();
        println!("{}", format_json(&report));
    } else {
        print_table_header();
        for (path, verdict) in &results {
            println!("{}", format_table_row(path, verdict));
        }
        log::info!("{} of {} packings recorded", index.len()?, inputs.len());
    }

    Ok(())
}
