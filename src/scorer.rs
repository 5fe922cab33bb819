//! Final-grid scoring.
//!
//! A player's board score counts axis-aligned squares whose four corner
//! cells all carry the player's secret color. A square of side `k` (corner
//! distance `k` cells) is worth `k` points, and every such square counts,
//! including overlapping and nested ones.

use crate::board::Grid;
use crate::protocol::{SecretColors, HEIGHT, WIDTH};

/// Total score of `color` on `grid`.
pub fn score_color(grid: &Grid, color: u8) -> u32 {
    let mut score = 0;
    for r1 in 0..HEIGHT {
        for c1 in 0..WIDTH {
            if grid[r1][c1] != color {
                continue;
            }
            for k in 1..HEIGHT.max(WIDTH) {
                let (r2, c2) = (r1 + k, c1 + k);
                if r2 >= HEIGHT || c2 >= WIDTH {
                    break;
                }
                if grid[r1][c2] == color && grid[r2][c1] == color && grid[r2][c2] == color {
                    score += k as u32;
                }
            }
        }
    }
    score
}

/// Board scores of both seats, in seat order.
pub fn score_secrets(grid: &Grid, secrets: SecretColors) -> [u32; 2] {
    [
        score_color(grid, secrets.seat(0)),
        score_color(grid, secrets.seat(1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid() -> Grid {
        [[0; WIDTH]; HEIGHT]
    }

    #[test]
    fn filled_block_counts_nested_squares() {
        let mut grid = empty_grid();
        for row in 0..3 {
            for col in 0..3 {
                grid[row][col] = 4;
            }
        }
        // Four unit squares, one side-2 square from (0, 0).
        assert_eq!(score_color(&grid, 4), 6);
    }

    #[test]
    fn corners_alone_suffice() {
        let mut grid = empty_grid();
        for (row, col) in [(2, 3), (2, 5), (4, 3), (4, 5)] {
            grid[row][col] = 1;
        }
        grid[3][4] = 6;
        assert_eq!(score_color(&grid, 1), 2);
        assert_eq!(score_color(&grid, 6), 0);
    }

    #[test]
    fn rectangles_do_not_count() {
        let mut grid = empty_grid();
        for (row, col) in [(0, 0), (0, 3), (2, 0), (2, 3)] {
            grid[row][col] = 2;
        }
        assert_eq!(score_color(&grid, 2), 0);
    }

    #[test]
    fn absent_color_scores_zero() {
        assert_eq!(score_color(&empty_grid(), 3), 0);
    }

    #[test]
    fn seat_scores_follow_secret_order() {
        let mut grid = empty_grid();
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            grid[row][col] = 5;
        }
        let scores = score_secrets(&grid, SecretColors([5, 2]));
        assert_eq!(scores, [1, 0]);
    }
}
