//! Input loading: packings, placements, and puzzle configuration.

use serde::de::DeserializeOwned;
use squarefit_canonical::ValidationError;
use squarefit_core::{CornerSet, Placement, Point, PuzzleConfig};
use std::io::{self, Read};
use thiserror::Error;

use crate::ConfigArgs;

/// Errors raised while loading CLI input.
#[derive(Error, Debug)]
pub enum InputError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Stdin could not be read.
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    /// Input was not the expected JSON shape.
    #[error("invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),
    /// A corner set does not have four corners.
    #[error("square {index} has {found} corners, expected 4")]
    Arity { index: usize, found: usize },
}

/// Reads a file, or stdin when no path is given.
pub fn read_source(input: Option<&str>) -> Result<String, InputError> {
    match input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InputError::Stdin)?;
            Ok(buffer)
        }
    }
}

fn read_json<T: DeserializeOwned>(input: Option<&str>, what: &'static str) -> Result<T, InputError> {
    let text = read_source(input)?;
    serde_json::from_str(&text).map_err(|source| InputError::Json { what, source })
}

/// Reads a JSON array of corner sets: `[[{"x": .., "y": ..}, ...], ...]`.
pub fn read_corner_sets(input: Option<&str>) -> Result<Vec<Vec<Point>>, InputError> {
    read_json(input, "packing")
}

/// Reads a JSON array of placements: `[{"x": .., "y": .., "rotation": ..}, ...]`.
pub fn read_placements(input: Option<&str>) -> Result<Vec<Placement>, InputError> {
    read_json(input, "placements")
}

/// Converts raw corner lists to corner sets without further validation.
pub fn to_corner_sets(raw: &[Vec<Point>]) -> Result<Vec<CornerSet>, InputError> {
    raw.iter()
        .enumerate()
        .map(|(index, points)| {
            CornerSet::try_from(points.as_slice())
                .map_err(|found| InputError::Arity { index, found })
        })
        .collect()
}

/// Builds the puzzle configuration: defaults, then config file, then flags.
pub fn load_config(args: &ConfigArgs) -> Result<PuzzleConfig, InputError> {
    let mut config = match &args.config {
        Some(path) => read_json(Some(path.as_str()), "config")?,
        None => PuzzleConfig::default(),
    };
    if let Some(side) = args.side {
        config.side_length = side;
    }
    if let Some(scale) = args.scale {
        config.quant_scale = scale;
    }
    config.validate()?;
    log::debug!(
        "puzzle config: side={} scale={} domain={}",
        config.side_length,
        config.quant_scale,
        config.domain.as_str()
    );
    Ok(config)
}
