//! Per-player aggregates across a tournament.

use std::time::Duration;

use crate::match_runner::{Outcome, SeatResult};

/// Running totals of one player's tournament.
#[derive(Debug, Default, Clone)]
pub struct PlayerStats {
    /// Move-production time summed over all matches.
    pub time_total: Duration,
    /// Move-production time of the slowest single match.
    pub time_max: Duration,
    /// Matches won.
    pub wins: u32,
    /// Matches tied.
    pub ties: u32,
    /// Matches lost.
    pub losses: u32,
    /// Matches forfeited.
    pub fails: u32,
    /// Competition points summed over all matches.
    pub score_total: i64,
}

impl PlayerStats {
    /// Folds one seat result into the totals.
    pub fn record(&mut self, seat: &SeatResult) {
        self.time_total += seat.elapsed;
        self.time_max = self.time_max.max(seat.elapsed);
        match seat.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Fail => self.fails += 1,
        }
        self.score_total += i64::from(seat.competition_score);
    }
}

/// Player indices ranked best first, by total score and then by wins.
/// Fully tied players keep registration order.
pub fn ranking(stats: &[PlayerStats]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..stats.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse((stats[i].score_total, stats[i].wins)));
    order
}
