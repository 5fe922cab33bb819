//! # Box Arbiter
//!
//! An arbiter and tournament driver for Box, a two-player game of placing
//! 2x6 color tiles on a 16x20 grid. Players are external programs; the
//! arbiter launches them, referees their matches over a line-oriented
//! stdin/stdout protocol, scores the final grids and reports a ranked
//! tournament table.
//!
//! It provides:
//! - Board rules and match-end detection ([`board`])
//! - Square-counting scoring of final grids ([`scorer`])
//! - The wire protocol tokens ([`protocol`])
//! - Single-match refereeing with per-move timing ([`match_runner`])
//! - Tournament scheduling, parallel execution and reporting
//!   ([`Tournament`](crate::tournament::Tournament))
//!
//! # Documentation Overview
//!
//! - For running whole tournaments, see [`Tournament`](crate::tournament::Tournament)
//!   and [`Configuration`](crate::config::Configuration).
//! - For refereeing one match, see [`run_match`](crate::match_runner::run_match).
//! - For the game rules themselves, see [`board::Board`] and the
//!   [`scorer`] module.
//! - For writing a player, see the protocol tokens in [`protocol`] and
//!   the example below.
//!
//! # Usage Example
//!
//! ```no_run
//! use box_arbiter::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let commands = vec!["./alpha".to_string(), "./beta --fast".to_string()];
//!     let config = Configuration::new()
//!         .with_rounds(2)
//!         .with_workers(2)
//!         .with_log_dir("logs");
//!
//!     let standings = Tournament::new(&commands, config)?.run()?;
//!     for (player, stats) in standings {
//!         println!("{}: {} points", player.name, stats.score_total);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Example Player
//!
//! A player reads prompts from stdin and answers each with one placement
//! line. This one uses the crate's own board to pick the first legal
//! placement:
//!
//! ```no_run
//! use std::io::{self, BufRead, Write};
//!
//! use box_arbiter::board::Board;
//! use box_arbiter::protocol::{
//!     Move, Orientation, Placement, Tile, HEIGHT, QUIT_LINE, START_LINE, WIDTH,
//! };
//!
//! fn first_legal(board: &Board) -> Placement {
//!     for row in 0..HEIGHT {
//!         for col in 0..WIDTH {
//!             for orientation in [Orientation::Horizontal, Orientation::Vertical] {
//!                 let placement = Placement { row, col, orientation };
//!                 if board.can_place(placement) {
//!                     return placement;
//!                 }
//!             }
//!         }
//!     }
//!     unreachable!("prompted only while a legal placement exists");
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let stdin = io::stdin();
//!     let mut lines = stdin.lock().lines();
//!     let mut next = || -> anyhow::Result<String> {
//!         Ok(lines.next().expect("arbiter closed stdin")?)
//!     };
//!
//!     let _secret: u8 = next()?.parse()?;
//!     let opening: Move = next()?.parse()?;
//!     let mut board = Board::new(opening.tile, opening.placement);
//!
//!     loop {
//!         // "Start", the opponent's last move, or "Quit".
//!         let event = next()?;
//!         if event == QUIT_LINE {
//!             return Ok(());
//!         }
//!         if event != START_LINE {
//!             let mv: Move = event.parse()?;
//!             board.place(mv.tile, mv.placement);
//!         }
//!         let tile: Tile = next()?.parse()?;
//!         let placement = first_legal(&board);
//!         board.place(tile, placement);
//!         println!("{placement}");
//!         io::stdout().flush()?;
//!     }
//! }
//! ```
//!
//! ## Player Requirements
//!
//! - Answer every prompt with exactly one placement line and flush it.
//! - An unparseable or illegal reply forfeits the match on the spot.
//! - Exit cleanly on the quit line: a nonzero exit status turns the
//!   seat's outcome into a forfeit, whatever happened on the board.
#![warn(missing_docs)]

pub use anyhow;

pub mod board;
pub mod config;
pub mod error;
mod logger;
pub mod match_runner;
pub mod player;
mod process;
pub mod protocol;
mod report;
pub mod schedule;
pub mod scorer;
pub mod stats;
pub mod tournament;
mod worker_pool;

/// Commonly used types for quick access.
///
/// ```rust
/// use box_arbiter::prelude::*;
/// ```
///
/// Includes:
/// - [`Configuration`](crate::config::Configuration)
/// - [`Tournament`](crate::tournament::Tournament) and
///   [`Standings`](crate::tournament::Standings)
/// - the per-match result types from [`match_runner`](crate::match_runner)
pub mod prelude {
    pub use crate::config::Configuration;
    pub use crate::match_runner::{MatchRecord, Outcome, SeatResult};
    pub use crate::player::Player;
    pub use crate::schedule::PairingMode;
    pub use crate::stats::PlayerStats;
    pub use crate::tournament::{Standings, Tournament};
}
