//! Command-line interface for nim-play.

use std::path::PathBuf;

use clap::Parser;
use nim_engine::Controller;

/// Play Nim between any mix of humans and computer players
#[derive(Parser, Debug)]
#[command(name = "nim-play")]
#[command(about = "Two-player Nim with an optimal computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML match configuration; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Controller for Home (ai, human or random)
    #[arg(long)]
    pub home: Option<Controller>,

    /// Controller for Away (ai, human or random)
    #[arg(long)]
    pub away: Option<Controller>,

    /// Row layout, e.g. "1,3,5,7"
    #[arg(short, long, allow_hyphen_values = true)]
    pub rows: Option<String>,

    /// Seed for reproducible computer play
    #[arg(short, long)]
    pub seed: Option<u64>,
}
