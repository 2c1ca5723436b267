//! Bounds command implementation.

use squarefit_core::{objective_value, packing_bounds};

use crate::input::{load_config, read_corner_sets, to_corner_sets};
use crate::ConfigArgs;

pub fn run(input: Option<String>, config: &ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let packing = to_corner_sets(&read_corner_sets(input.as_deref())?)?;

    let bounds = packing_bounds(&packing);
    let objective = objective_value(&bounds, config.side_length);

    println!("squares:   {}", packing.len());
    println!("min:       ({}, {})", bounds.min_x, bounds.min_y);
    println!("max:       ({}, {})", bounds.max_x, bounds.max_y);
    println!("width:     {}", bounds.width());
    println!("height:    {}", bounds.height());
    println!("objective: {:.5}", objective.value);
    println!("precise:   {}", objective.display());
    Ok(())
}
