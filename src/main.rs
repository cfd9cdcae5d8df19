//! nim-play: run one Nim match on the terminal.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use nim_engine::{
    games::nim, parse_rows, MatchConfig, MoveSource, Side, StdConsole, StdinSource, Winner,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut turn_loop = nim::new_match(&config, StdConsole, |_: Side| {
        Box::new(StdinSource) as Box<dyn MoveSource>
    })
    .context("cannot start match")?;

    let report = turn_loop.run();
    info!(winner = ?report.winner, plies = report.plies(), "finished");

    if report.winner == Winner::Aborted {
        anyhow::bail!("match aborted");
    }
    Ok(())
}

/// Defaults, then the config file, then flags.
fn load_config(cli: &Cli) -> Result<MatchConfig> {
    let mut config = match &cli.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("cannot load {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if let Some(rows) = &cli.rows {
        config = config.with_rows(parse_rows(rows)?);
    }
    if let Some(home) = cli.home {
        config = config.with_controller(Side::Home, home);
    }
    if let Some(away) = cli.away {
        config = config.with_controller(Side::Away, away);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}
