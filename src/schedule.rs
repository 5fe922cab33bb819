//! Pairing schedules.

/// How players are paired across the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingMode {
    /// Each pair meets once; the lower-indexed player moves first.
    Single,
    /// The given number of double round robins: every ordered pair plays
    /// once per round, so seats swap within each round.
    Rounds(u32),
}

/// The match list in play order, as (first mover, second mover) player
/// indices.
pub fn make_pairings(players: usize, mode: PairingMode) -> Vec<(usize, usize)> {
    match mode {
        PairingMode::Single => {
            let mut pairings = Vec::new();
            for i in 0..players {
                for j in i + 1..players {
                    pairings.push((i, j));
                }
            }
            pairings
        }
        PairingMode::Rounds(rounds) => {
            let mut round = Vec::new();
            for i in 0..players {
                for j in 0..players {
                    if i != j {
                        round.push((i, j));
                    }
                }
            }
            let mut pairings = Vec::with_capacity(round.len() * rounds as usize);
            for _ in 0..rounds {
                pairings.extend_from_slice(&round);
            }
            pairings
        }
    }
}

/// How many scheduled matches each player appears in. The schedule is
/// uniform, so player 0's count serves for everyone.
pub fn games_per_player(pairings: &[(usize, usize)]) -> usize {
    pairings.iter().filter(|(i, j)| *i == 0 || *j == 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode_pairs_each_pair_once() {
        assert_eq!(
            make_pairings(4, PairingMode::Single),
            [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn rounds_mode_swaps_seats_and_repeats() {
        let pairings = make_pairings(3, PairingMode::Rounds(2));
        let round = [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)];
        assert_eq!(pairings.len(), 12);
        assert_eq!(&pairings[..6], round);
        assert_eq!(&pairings[6..], round);
    }

    #[test]
    fn too_few_players_schedule_nothing() {
        assert!(make_pairings(1, PairingMode::Single).is_empty());
        assert!(make_pairings(0, PairingMode::Rounds(3)).is_empty());
    }

    #[test]
    fn per_player_match_counts() {
        let single = make_pairings(4, PairingMode::Single);
        assert_eq!(games_per_player(&single), 3);
        let rounds = make_pairings(3, PairingMode::Rounds(2));
        assert_eq!(games_per_player(&rounds), 8);
    }
}
