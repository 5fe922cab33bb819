//! Tournament execution: scheduling, match execution, ordered reporting.

use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, warn};

use crate::config::Configuration;
use crate::logger;
use crate::match_runner::{run_match, MatchRecord, MatchTask, Outcome, SeatResult};
use crate::player::{register_players, Player};
use crate::report::{self, Tee};
use crate::schedule::{games_per_player, make_pairings, PairingMode};
use crate::stats::{ranking, PlayerStats};
use crate::worker_pool::WorkerPool;

/// Final standings: each player with its aggregates, best first.
pub type Standings = Vec<(Arc<Player>, PlayerStats)>;

/// A configured tournament, ready to run.
pub struct Tournament {
    players: Vec<Arc<Player>>,
    config: Configuration,
}

impl Tournament {
    /// Registers the players. At least two launch commands are required.
    pub fn new(commands: &[String], config: Configuration) -> anyhow::Result<Tournament> {
        if commands.len() < 2 {
            bail!("a tournament needs at least two player commands");
        }
        Ok(Tournament {
            players: register_players(commands),
            config,
        })
    }

    /// The registered players, in registration order.
    pub fn players(&self) -> &[Arc<Player>] {
        &self.players
    }

    /// Plays every scheduled match, streams the results table to stdout
    /// (and the log directory, when configured) and returns the final
    /// standings.
    pub fn run(&self) -> anyhow::Result<Standings> {
        let run_dir = match &self.config.log_dir {
            Some(dir) => Some(report::make_run_dir(dir)?),
            None => None,
        };
        if self.config.trace_log {
            logger::init_trace_log(run_dir.as_deref())?;
        }

        let mode = if self.config.rounds == 0 {
            PairingMode::Single
        } else {
            PairingMode::Rounds(self.config.rounds)
        };
        let pairings = make_pairings(self.players.len(), mode);
        debug!(
            players = self.players.len(),
            matches = pairings.len(),
            ?mode,
            "tournament scheduled"
        );
        if self.config.workers > num_cpus::get_physical() {
            warn!(
                workers = self.config.workers,
                physical_cores = num_cpus::get_physical(),
                "more workers than physical cores"
            );
        }

        if let Some(dir) = &run_dir {
            println!("Writing logs to directory {}", dir.display());
            println!();
        }

        // Seeds are drawn in schedule order before any match runs, so a
        // fixed master seed reproduces every match under any worker count.
        let mut master = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let tasks: Vec<MatchTask> = pairings
            .iter()
            .enumerate()
            .map(|(game_index, &(i, j))| {
                let logs = run_dir.as_deref().map(|dir| {
                    report::match_log_paths(
                        dir,
                        &self.players[i].name,
                        &self.players[j].name,
                        game_index,
                        pairings.len(),
                    )
                });
                let (transcript, stderr_logs) = match logs {
                    Some(logs) => (Some(logs.transcript), logs.stderr_logs.map(Some)),
                    None => (None, [None, None]),
                };
                MatchTask {
                    players: [Arc::clone(&self.players[i]), Arc::clone(&self.players[j])],
                    transcript,
                    stderr_logs,
                    seed: master.random(),
                }
            })
            .collect();

        let results_file = match (&run_dir, pairings.len() > 1) {
            (Some(dir), true) => Some(
                File::create(dir.join("results.txt")).context("cannot create results.txt")?,
            ),
            _ => None,
        };
        let mut tee = Tee::new(results_file);
        report::write_results_header(&mut tee).context("results table")?;

        let mut stats = vec![PlayerStats::default(); self.players.len()];
        if self.config.workers == 0 {
            for (game_index, task) in tasks.iter().enumerate() {
                let (i, j) = pairings[game_index];
                // Show who is playing while the match is in progress.
                report::write_row_start(
                    &mut tee,
                    game_index,
                    &self.players[i].name,
                    &self.players[j].name,
                )
                .context("results table")?;
                tee.flush().context("results table")?;
                let record = record_or_forfeit(run_match(task), task);
                report::write_row_finish(&mut tee, &record).context("results table")?;
                stats[i].record(&record.seats[0]);
                stats[j].record(&record.seats[1]);
            }
        } else {
            let pool = WorkerPool::new(self.config.workers);
            let pending: Vec<_> = tasks
                .into_iter()
                .map(|task| pool.submit(move || (run_match(&task), task)))
                .collect();
            // Drain strictly in submission order. An early slow match
            // delays later rows, but the table never reorders.
            for (game_index, receiver) in pending.into_iter().enumerate() {
                let (i, j) = pairings[game_index];
                let (result, task) = receiver.recv().context("match worker dropped its result")?;
                let record = record_or_forfeit(result, &task);
                stats[i].record(&record.seats[0]);
                stats[j].record(&record.seats[1]);
                report::write_row_start(
                    &mut tee,
                    game_index,
                    &self.players[i].name,
                    &self.players[j].name,
                )
                .context("results table")?;
                report::write_row_finish(&mut tee, &record).context("results table")?;
            }
        }
        report::write_results_footer(&mut tee).context("results table")?;
        tee.flush().context("results table")?;
        drop(tee);

        if pairings.len() > 1 {
            println!();
            let summary_file = match &run_dir {
                Some(dir) => Some(
                    File::create(dir.join("summary.txt")).context("cannot create summary.txt")?,
                ),
                _ => None,
            };
            let mut tee = Tee::new(summary_file);
            report::write_summary(&mut tee, &self.players, &stats, games_per_player(&pairings))
                .context("summary table")?;
            tee.flush().context("summary table")?;
        }

        if let Some(dir) = &run_dir {
            println!();
            println!("Logs written to directory {}", dir.display());
        }

        Ok(ranking(&stats)
            .into_iter()
            .map(|i| (Arc::clone(&self.players[i]), stats[i].clone()))
            .collect())
    }
}

/// A match the arbiter itself could not run (spawn or log-file trouble)
/// counts as a double forfeit and the tournament goes on.
fn record_or_forfeit(result: anyhow::Result<MatchRecord>, task: &MatchTask) -> MatchRecord {
    match result {
        Ok(record) => record,
        Err(err) => {
            error!(
                first = %task.players[0].name,
                second = %task.players[1].name,
                "match aborted: {err:#}"
            );
            let forfeit = SeatResult {
                outcome: Outcome::Fail,
                board_score: 0,
                competition_score: 0,
                elapsed: Duration::ZERO,
            };
            MatchRecord {
                seats: [forfeit, forfeit],
            }
        }
    }
}
