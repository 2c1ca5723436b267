//! Squarefit CLI - offline validation and scoring of square packings.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;

mod commands;
mod input;
mod output;

use commands::{bounds, canonicalize, corners, dedup, validate};

#[derive(Parser)]
#[command(name = "squarefit")]
#[command(about = "Square-packing validation, scoring, and canonical hashing")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Puzzle configuration flags shared by commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file with `side_length` / `quant_scale`
    #[arg(long)]
    config: Option<String>,
    /// Square side length in board pixels (overrides config file)
    #[arg(long)]
    side: Option<f64>,
    /// Quantization scale (overrides config file)
    #[arg(long)]
    scale: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a packing of corner sets
    Validate {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if the packing is rejected
        #[arg(long)]
        strict: bool,
    },
    /// Convert placements to corner sets
    Corners {
        /// Input JSON file of placements (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Decimal places to round corners to
        #[arg(long, default_value_t = squarefit_core::config::SUBMIT_CORNER_PLACES)]
        round: u32,
    },
    /// Show packing bounds and objective value without validating
    Bounds {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show canonical record bytes and content hash
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Validate several packings against one duplicate index
    Dedup {
        /// Input JSON files, in submission order
        #[arg(required = true)]
        inputs: Vec<String>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Puzzle instance identifier
        #[arg(long, default_value = "fit")]
        instance: String,
        /// Compare content hashes instead of objective values
        #[arg(long)]
        by_hash: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let result = match cli.command {
        Commands::Validate {
            input,
            config,
            json,
            strict,
        } => validate::run(input, &config, json, strict),
        Commands::Corners {
            input,
            config,
            round,
        } => corners::run(input, &config, round),
        Commands::Bounds { input, config } => bounds::run(input, &config),
        Commands::Canonicalize { input, config } => canonicalize::run(input, &config),
        Commands::Dedup {
            inputs,
            config,
            instance,
            by_hash,
            json,
        } => dedup::run(inputs, &config, instance, by_hash, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
