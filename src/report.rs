//! Result tables, log-file layout and the stdout/file tee.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use time::{format_description, OffsetDateTime};

use crate::match_runner::MatchRecord;
use crate::player::Player;
use crate::stats::{ranking, PlayerStats};

const RESULTS_DASHES: &str =
    "---- ------------------ ------------------ --- --- ----- ----- ---- ---- ------ ------";
const SUMMARY_DASHES: &str = "------------------ ------ ------ ---- ---- ---- ---- ---- ------";

/// Writes everything to stdout and, when a file is given, to it as well.
pub(crate) struct Tee {
    file: Option<File>,
}

impl Tee {
    pub(crate) fn new(file: Option<File>) -> Tee {
        Tee { file }
    }
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn write_results_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Game Player 1           Player 2           Sc1 Sc2 Outc1 Outc2 Pts1 Pts2 Time 1 Time 2"
    )?;
    writeln!(out, "{RESULTS_DASHES}")
}

/// The leading row columns, printed before the match so sequential runs
/// show who is currently playing.
pub(crate) fn write_row_start(
    out: &mut impl Write,
    game_index: usize,
    name1: &str,
    name2: &str,
) -> io::Result<()> {
    write!(out, "{:4} {:<18} {:<18} ", game_index + 1, name1, name2)
}

pub(crate) fn write_row_finish(out: &mut impl Write, record: &MatchRecord) -> io::Result<()> {
    let [p1, p2] = &record.seats;
    writeln!(
        out,
        "{:3} {:3} {:<5} {:<5} {:4} {:4} {:6.2} {:6.2}",
        p1.board_score,
        p2.board_score,
        p1.outcome.code(),
        p2.outcome.code(),
        p1.competition_score,
        p2.competition_score,
        p1.elapsed.as_secs_f64(),
        p2.elapsed.as_secs_f64()
    )
}

pub(crate) fn write_results_footer(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{RESULTS_DASHES}")
}

/// The per-player summary table, ranked best first, followed by the
/// registered command lines.
pub(crate) fn write_summary(
    out: &mut impl Write,
    players: &[Arc<Player>],
    stats: &[PlayerStats],
    games_per_player: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "Player             Avg.Tm Max.Tm Tot. Wins Ties Loss Fail Points"
    )?;
    writeln!(out, "{SUMMARY_DASHES}")?;
    for index in ranking(stats) {
        let s = &stats[index];
        writeln!(
            out,
            "{:<18} {:6.2} {:6.2} {:4} {:4} {:4} {:4} {:4} {:6}",
            players[index].name,
            s.time_total.as_secs_f64() / games_per_player as f64,
            s.time_max.as_secs_f64(),
            games_per_player,
            s.wins,
            s.ties,
            s.losses,
            s.fails,
            s.score_total
        )?;
    }
    writeln!(out, "{SUMMARY_DASHES}")?;
    writeln!(out)?;
    writeln!(out, "Player command lines:")?;
    for (ordinal, player) in players.iter().enumerate() {
        writeln!(out, "{:4}. {}: {}", ordinal + 1, player.name, player.command)?;
    }
    Ok(())
}

/// Per-match log file paths inside a run directory.
pub(crate) struct MatchLogs {
    pub(crate) transcript: PathBuf,
    pub(crate) stderr_logs: [PathBuf; 2],
}

/// Names the three log files of one match. Multi-match runs prefix the
/// game number so repeated pairings stay distinguishable.
pub(crate) fn match_log_paths(
    run_dir: &Path,
    name1: &str,
    name2: &str,
    game_index: usize,
    game_count: usize,
) -> MatchLogs {
    let mut prefix = format!("{name1}-vs-{name2}");
    if game_count > 1 {
        prefix = format!("game-{}-of-{}-{}", game_index + 1, game_count, prefix);
    }
    MatchLogs {
        transcript: run_dir.join(format!("{prefix}-transcript.txt")),
        stderr_logs: [
            run_dir.join(format!("{prefix}-output-1.txt")),
            run_dir.join(format!("{prefix}-output-2.txt")),
        ],
    }
}

/// Creates the timestamped run directory under `parent`, which must
/// already exist.
pub(crate) fn make_run_dir(parent: &Path) -> anyhow::Result<PathBuf> {
    if !parent.is_dir() {
        bail!("log directory {} does not exist", parent.display());
    }
    let format = format_description::parse("[year][month][day]T[hour][minute][second]")
        .context("run directory timestamp format")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = now.format(&format).context("format run directory timestamp")?;
    let run_dir = parent.join(stamp);
    fs::create_dir(&run_dir)
        .with_context(|| format!("cannot create run directory {}", run_dir.display()))?;
    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::match_runner::{Outcome, SeatResult};

    use super::*;

    fn seat(outcome: Outcome, board: u32, points: i32, millis: u64) -> SeatResult {
        SeatResult {
            outcome,
            board_score: board,
            competition_score: points,
            elapsed: Duration::from_millis(millis),
        }
    }

    fn row(game_index: usize, name1: &str, name2: &str, record: &MatchRecord) -> String {
        let mut out = Vec::new();
        write_row_start(&mut out, game_index, name1, name2).unwrap();
        write_row_finish(&mut out, record).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn result_rows_align_with_the_header() {
        let record = MatchRecord {
            seats: [
                seat(Outcome::Win, 10, 203, 500),
                seat(Outcome::Loss, 7, 97, 1250),
            ],
        };
        assert_eq!(
            row(0, "alpha", "beta", &record),
            "   1 alpha              beta                10   7 WIN   LOSS   203   97   0.50   1.25\n"
        );
    }

    #[test]
    fn long_names_use_their_full_column() {
        let record = MatchRecord {
            seats: [
                seat(Outcome::Fail, 0, 0, 12340),
                seat(Outcome::Fail, 0, 200, 0),
            ],
        };
        assert_eq!(
            row(11, "a-very-long-player", "b", &record),
            "  12 a-very-long-player b                    0   0 FAIL  FAIL     0  200  12.34   0.00\n"
        );
    }

    #[test]
    fn summary_ranks_and_lists_commands() {
        let players = vec![
            Arc::new(Player {
                name: "alpha".to_owned(),
                command: "./bots/alpha --depth 3".to_owned(),
            }),
            Arc::new(Player {
                name: "beta".to_owned(),
                command: "./beta".to_owned(),
            }),
        ];
        let mut alpha = PlayerStats::default();
        alpha.record(&seat(Outcome::Win, 10, 203, 500));
        alpha.record(&seat(Outcome::Win, 9, 205, 1250));
        alpha.record(&seat(Outcome::Loss, 3, 133, 120));
        let mut beta = PlayerStats::default();
        beta.record(&seat(Outcome::Tie, 5, 150, 80));
        beta.record(&seat(Outcome::Fail, 0, 0, 200));
        beta.record(&seat(Outcome::Loss, 1, 97, 300));

        let mut out = Vec::new();
        write_summary(&mut out, &players, &[alpha, beta], 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Player             Avg.Tm Max.Tm Tot. Wins Ties Loss Fail Points"
        );
        assert_eq!(
            lines[2],
            "alpha                0.62   1.25    3    2    0    1    0    541"
        );
        assert_eq!(
            lines[3],
            "beta                 0.19   0.30    3    0    1    1    1    247"
        );
        assert_eq!(lines[6], "Player command lines:");
        assert_eq!(lines[7], "   1. alpha: ./bots/alpha --depth 3");
        assert_eq!(lines[8], "   2. beta: ./beta");
    }

    #[test]
    fn log_names_carry_the_game_number_only_in_multi_match_runs() {
        let dir = Path::new("/tmp/run");
        let single = match_log_paths(dir, "alpha", "beta", 0, 1);
        assert_eq!(single.transcript, dir.join("alpha-vs-beta-transcript.txt"));
        assert_eq!(single.stderr_logs[0], dir.join("alpha-vs-beta-output-1.txt"));
        let multi = match_log_paths(dir, "alpha", "beta", 3, 12);
        assert_eq!(
            multi.transcript,
            dir.join("game-4-of-12-alpha-vs-beta-transcript.txt")
        );
        assert_eq!(
            multi.stderr_logs[1],
            dir.join("game-4-of-12-alpha-vs-beta-output-2.txt")
        );
    }

    #[test]
    fn run_dir_requires_an_existing_parent() {
        assert!(make_run_dir(Path::new("/nonexistent-parent-dir")).is_err());
    }

    #[test]
    fn tee_duplicates_output_into_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let mut tee = Tee::new(Some(File::create(&path).unwrap()));
        writeln!(tee, "hello table").unwrap();
        tee.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello table\n");
    }
}
