use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smart-irrigation",
    version,
    about = "Crop water requirements and irrigation recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Crop/soil dataset CSV (overrides config and SMART_IRRIGATION_DATASET)
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List crop names, optionally within one category
    Crops {
        #[arg(long)]
        category: Option<String>,
    },
    /// List soil types
    Soils,
    /// List crop categories
    Categories,
    /// Show the record for a crop grown in a soil type
    Lookup {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        soil: String,
    },
    /// Compute an irrigation recommendation from a soil moisture reading
    Recommend {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        soil: String,
        /// Current soil moisture, 0-100 (defaults to the configured value)
        #[arg(long, value_parser = parse_moisture)]
        moisture: Option<f32>,
    },
    /// Show dataset statistics
    Summary,
    /// Pick category, crop, soil and moisture interactively
    Interactive,
    /// Write a config file through interactive prompts
    Init,
}

/// Mirrors the 0-100 slider range; the calculator itself does not clamp.
fn parse_moisture(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("moisture must be between 0 and 100, got {}", value))
    }
}
