//! Canonicalize command implementation.

use squarefit_core::{PackingValidator, Verdict};

use crate::input::{load_config, read_corner_sets};
use crate::ConfigArgs;

pub fn run(input: Option<String>, config: &ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let validator = PackingValidator::new(config)?;
    let corner_sets = read_corner_sets(input.as_deref())?;

    let accepted = match validator.validate(&corner_sets)? {
        Verdict::Accepted(accepted) => accepted,
        Verdict::Rejected(rejection) => {
            return Err(format!(
                "packing rejected ({:?}): {}",
                rejection.reason,
                rejection.detail.unwrap_or_default()
            )
            .into())
        }
    };

    let bytes = validator
        .canonicalizer()
        .canonicalize_serializable(&accepted.canonical_record)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(&bytes));
    println!("sha-256: {}", accepted.content_hash);
    Ok(())
}
