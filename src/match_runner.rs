//! Runs one match between two seated player processes.

use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::board::{Board, OPENING_PLACEMENT};
use crate::error::MatchError;
use crate::player::Player;
use crate::process::PlayerProcess;
use crate::protocol::{Move, Placement, SecretColors, Tile, QUIT_LINE, START_LINE};
use crate::scorer;

/// Competition points for a win, before adding the score difference.
pub const WIN_BASE: i32 = 200;
/// Competition points for a loss, before adding the (negative) difference.
pub const LOSS_BASE: i32 = 100;
/// Competition points for a tie.
pub const TIE_SCORE: i32 = 150;

/// How a seat's match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Higher board score, or the opponent forfeited.
    Win,
    /// Lower board score.
    Loss,
    /// Equal board scores.
    Tie,
    /// Forfeit: bad move, broken pipe or nonzero exit status.
    Fail,
}

impl Outcome {
    /// Fixed-width code used in result tables.
    pub fn code(self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Tie => "TIE",
            Outcome::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One seat's slice of a match result.
#[derive(Debug, Clone, Copy)]
pub struct SeatResult {
    /// How the match ended for this seat.
    pub outcome: Outcome,
    /// Squares scored with the seat's secret color.
    pub board_score: u32,
    /// Tournament points awarded for this match.
    pub competition_score: i32,
    /// Total time the seat spent producing moves.
    pub elapsed: Duration,
}

/// Both seats' results, in seating order.
#[derive(Debug, Clone, Copy)]
pub struct MatchRecord {
    /// Seat 0 moved first.
    pub seats: [SeatResult; 2],
}

/// Everything needed to run one scheduled match.
#[derive(Debug)]
pub struct MatchTask {
    /// Seated players; index 0 moves first.
    pub players: [Arc<Player>; 2],
    /// Where to write the transcript, if logging.
    pub transcript: Option<PathBuf>,
    /// Per-seat stderr capture files, if logging.
    pub stderr_logs: [Option<PathBuf>; 2],
    /// Seed for this match's tile and secret-color draws.
    pub seed: u64,
}

/// Result of a seat in a match that ran to a regular end.
fn regular_result(own: u32, opponent: u32, elapsed: Duration) -> SeatResult {
    let diff = own as i32 - opponent as i32;
    let (outcome, competition_score) = match diff.cmp(&0) {
        Ordering::Greater => (Outcome::Win, WIN_BASE + diff),
        Ordering::Less => (Outcome::Loss, LOSS_BASE + diff),
        Ordering::Equal => (Outcome::Tie, TIE_SCORE),
    };
    SeatResult {
        outcome,
        board_score: own,
        competition_score,
        elapsed,
    }
}

/// The first prompt a seat receives carries its secret color and the
/// opening move; every prompt ends with the tile the seat must now place.
fn send_prompt(
    seat: &mut PlayerProcess,
    first_prompt: bool,
    secret: u8,
    opening: Move,
    previous: Option<Move>,
    drawn: Tile,
) -> Result<(), MatchError> {
    if first_prompt {
        seat.send_line(&secret.to_string())?;
        seat.send_line(&opening.to_string())?;
    }
    match previous {
        None => seat.send_line(START_LINE)?,
        Some(mv) => seat.send_line(&mv.to_string())?,
    }
    seat.send_line(&drawn.to_string())
}

/// Runs `task` to completion and derives both seats' results.
///
/// Player faults become `FAIL` outcomes; an `Err` here means the arbiter
/// itself could not run the match (spawn or log-file trouble).
pub fn run_match(task: &MatchTask) -> anyhow::Result<MatchRecord> {
    let mut rng = StdRng::seed_from_u64(task.seed);
    let opening = Move {
        tile: Tile::random(&mut rng),
        placement: OPENING_PLACEMENT,
    };
    let secrets = SecretColors::random(&mut rng);
    debug!(
        first = %task.players[0].name,
        second = %task.players[1].name,
        seed = task.seed,
        "match starting"
    );

    let mut transcript = match &task.transcript {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create transcript {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let mut seats = [
        PlayerProcess::launch(&task.players[0].command, task.stderr_logs[0].as_deref())?,
        PlayerProcess::launch(&task.players[1].command, task.stderr_logs[1].as_deref())?,
    ];

    if let Some(out) = &mut transcript {
        writeln!(out, "{secrets}").context("transcript write")?;
        writeln!(out, "{opening}").context("transcript write")?;
    }

    let mut board = Board::new(opening.tile, opening.placement);
    let mut elapsed = [Duration::ZERO; 2];
    let mut turn = 0usize;
    let mut last_move: Option<Move> = None;

    while !board.is_game_over() {
        let mover = turn % 2;
        let drawn = Tile::random(&mut rng);
        let prompt = send_prompt(
            &mut seats[mover],
            turn < 2,
            secrets.seat(mover),
            opening,
            last_move,
            drawn,
        );
        if let Err(err) = prompt {
            debug!(player = %task.players[mover].name, %err, "prompt failed");
            break;
        }
        let (line, latency) = match seats[mover].read_line_timed() {
            Ok(reply) => reply,
            Err(err) => {
                debug!(player = %task.players[mover].name, %err, "reply failed");
                break;
            }
        };
        elapsed[mover] += latency;

        let accepted = match line.parse::<Placement>() {
            Err(_) => Err(MatchError::Protocol { line: line.clone() }),
            Ok(placement) if !board.can_place(placement) => {
                Err(MatchError::IllegalMove { placement })
            }
            Ok(placement) => Ok(placement),
        };
        match accepted {
            Ok(placement) => {
                board.place(drawn, placement);
                let mv = Move {
                    tile: drawn,
                    placement,
                };
                if let Some(out) = &mut transcript {
                    writeln!(out, "{mv}").context("transcript write")?;
                }
                trace!(turn, player = %task.players[mover].name, %mv, "move accepted");
                last_move = Some(mv);
                turn += 1;
            }
            Err(err) => {
                debug!(player = %task.players[mover].name, %err, "move rejected");
                if let Some(out) = &mut transcript {
                    writeln!(out, "# {line}").context("transcript write")?;
                }
                break;
            }
        }
    }

    let scores = scorer::score_secrets(board.grid(), secrets);
    let mut record = if board.is_game_over() {
        MatchRecord {
            seats: [
                regular_result(scores[0], scores[1], elapsed[0]),
                regular_result(scores[1], scores[0], elapsed[1]),
            ],
        }
    } else {
        // Irregular end: the seat on the move failed, the other one wins
        // by forfeit. Board scores stay as measured.
        let failer = turn % 2;
        MatchRecord {
            seats: [0, 1].map(|seat| SeatResult {
                outcome: if seat == failer {
                    Outcome::Fail
                } else {
                    Outcome::Win
                },
                board_score: scores[seat],
                competition_score: if seat == failer { 0 } else { WIN_BASE },
                elapsed: elapsed[seat],
            }),
        }
    };

    for seat in &mut seats {
        if seat.is_running() {
            // Best effort; a seat that already left cannot take the line.
            let _ = seat.send_line(QUIT_LINE);
        }
    }
    for (index, seat) in seats.iter_mut().enumerate() {
        let status = seat
            .wait()
            .with_context(|| format!("waiting for {}", task.players[index].name))?;
        if !status.success() {
            let err = MatchError::ProcessExit { status };
            warn!(player = %task.players[index].name, %err, "seat forfeits");
            record.seats[index].outcome = Outcome::Fail;
        }
    }

    if let Some(out) = &mut transcript {
        out.flush().context("transcript flush")?;
    }
    Ok(record)
}
