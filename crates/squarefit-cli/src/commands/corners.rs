//! Corners command implementation.

use squarefit_core::corners_from_placement;

use crate::input::{load_config, read_placements};
use crate::output::format_json;
use crate::ConfigArgs;

pub fn run(
    input: Option<String>,
    config: &ConfigArgs,
    round: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let placements = read_placements(input.as_deref())?;

    let corner_sets: Vec<_> = placements
        .iter()
        .map(|p| corners_from_placement(p, config.side_length).rounded(round))
        .collect();

    println!("{}", format_json(&corner_sets));
    Ok(())
}
