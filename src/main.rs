use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use box_arbiter::prelude::*;

/// Plays Box matches between external player programs and reports a
/// tournament table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Command to execute for player 1
    command1: String,

    /// Command to execute for player 2
    command2: String,

    /// Commands to execute for further players
    #[arg(value_name = "COMMANDN")]
    commands: Vec<String>,

    /// Number of full rounds to play (0 plays a single game per pair)
    #[arg(long, default_value_t = 0)]
    rounds: u32,

    /// Directory where to write match logs
    #[arg(long, value_name = "DIR")]
    logdir: Option<PathBuf>,

    /// Run up to this many matches in parallel (0 runs them sequentially)
    #[arg(short = 't', long, default_value_t = 0)]
    threads: usize,

    /// Master seed for tile and secret-color draws (random when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Also write an arbiter trace log
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut commands = vec![cli.command1, cli.command2];
    commands.extend(cli.commands);

    let mut config = Configuration::new()
        .with_rounds(cli.rounds)
        .with_workers(cli.threads)
        .with_trace_log(cli.trace);
    if let Some(dir) = cli.logdir {
        config = config.with_log_dir(dir);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    Tournament::new(&commands, config)?.run()?;
    Ok(())
}
