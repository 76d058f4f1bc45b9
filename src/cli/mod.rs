//! Command-line surface for fitcast.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Weather-aware outfit recommendations
#[derive(Parser, Debug)]
#[command(name = "fitcast", version, about = "Weather-aware outfit recommendations")]
pub struct Cli {
    /// Config file (defaults to $FITCAST_CONFIG or the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Suggest an outfit for an activity at a location
    Recommend(RecommendArgs),
    /// Print current weather for a location
    Weather(WeatherArgs),
}

/// Arguments for `fitcast recommend`. Missing inputs are prompted for.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Where you are going (e.g. "Ann Arbor, MI")
    #[arg(short, long)]
    pub location: Option<String>,

    /// What you plan to do there
    #[arg(short, long)]
    pub activity: Option<String>,

    /// Also generate an illustration of the outfit
    #[arg(short, long)]
    pub illustrate: bool,

    /// Chat model override
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for `fitcast weather`.
#[derive(Args, Debug)]
pub struct WeatherArgs {
    /// Location as CITY, STATE
    pub location: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
