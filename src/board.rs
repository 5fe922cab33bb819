//! Grid state, placement legality and match-end detection.

use std::fmt;

use crate::protocol::{Orientation, Placement, Tile, COLORS, HEIGHT, WIDTH};

/// Where the arbiter places the opening tile; the same in every match.
pub const OPENING_PLACEMENT: Placement = Placement {
    row: 7,
    col: 7,
    orientation: Orientation::Horizontal,
};

/// A tile placed on an already-filled cell may cover at most this many
/// filled cells.
pub const OVERLAP_LIMIT: usize = 4;

/// Cell colors, `0` meaning empty.
pub type Grid = [[u8; WIDTH]; HEIGHT];

/// A half-open cell rectangle `[r1, r2) x [c1, c2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    r1: usize,
    c1: usize,
    r2: usize,
    c2: usize,
}

impl Region {
    /// The rectangle `placement` covers, or `None` if it leaves the grid.
    fn of(placement: Placement) -> Option<Region> {
        let (rows, cols) = placement.orientation.extent();
        let region = Region {
            r1: placement.row,
            c1: placement.col,
            r2: placement.row + rows,
            c2: placement.col + cols,
        };
        (region.r2 <= HEIGHT && region.c2 <= WIDTH).then_some(region)
    }
}

/// Every in-bounds tile rectangle, row-major by anchor, horizontal before
/// vertical at the same anchor. The list is fixed for the whole match and
/// orders the termination scan.
fn candidate_regions() -> Vec<Region> {
    let mut regions = Vec::new();
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let placement = Placement {
                    row,
                    col,
                    orientation,
                };
                if let Some(region) = Region::of(placement) {
                    regions.push(region);
                }
            }
        }
    }
    regions
}

/// Board of one running match.
///
/// Placements overwrite whatever they cover; cells never revert to empty.
/// That monotonicity is what lets [`Board::is_game_over`] amortize its scan:
/// a region whose overlap once exceeds [`OVERLAP_LIMIT`] stays that way, so
/// the cursor only ever advances.
pub struct Board {
    grid: Grid,
    regions: Vec<Region>,
    cursor: usize,
}

impl Board {
    /// Creates a board with the opening tile already placed.
    pub fn new(opening_tile: Tile, opening: Placement) -> Board {
        let mut board = Board {
            grid: [[0; WIDTH]; HEIGHT],
            regions: candidate_regions(),
            cursor: 0,
        };
        board.place(opening_tile, opening);
        board
    }

    /// Whether a tile may be placed at `placement`: inside the grid,
    /// covering at most [`OVERLAP_LIMIT`] filled cells, and, when covering
    /// none, sharing at least one edge with a filled cell.
    pub fn can_place(&self, placement: Placement) -> bool {
        let Some(region) = Region::of(placement) else {
            return false;
        };
        let overlap = self.overlap(region);
        if overlap > OVERLAP_LIMIT {
            return false;
        }
        if overlap > 0 {
            return true;
        }
        self.touches_filled_cell(region)
    }

    /// Writes `tile` at `placement` and advances the termination cursor.
    ///
    /// The caller checks [`Board::can_place`] first; placement itself never
    /// fails. Each color is written twice, mirrored through the rectangle
    /// center, so the long edges read the tile in opposite directions.
    pub fn place(&mut self, tile: Tile, placement: Placement) {
        let (row, col) = (placement.row, placement.col);
        for (i, &color) in tile.colors().iter().enumerate() {
            match placement.orientation {
                Orientation::Horizontal => {
                    self.grid[row][col + i] = color;
                    self.grid[row + 1][col + COLORS - 1 - i] = color;
                }
                Orientation::Vertical => {
                    self.grid[row + i][col + 1] = color;
                    self.grid[row + COLORS - 1 - i][col] = color;
                }
            }
        }
        while let Some(&region) = self.regions.get(self.cursor) {
            if self.overlap(region) <= OVERLAP_LIMIT {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Whether no candidate region can take a tile anymore.
    ///
    /// The scan tests the overlap bound only. A board whose sole surviving
    /// regions are empty patches with no filled neighbor counts as live even
    /// though [`Board::can_place`] rejects them; see the module tests.
    pub fn is_game_over(&self) -> bool {
        self.cursor >= self.regions.len()
    }

    /// The current cell colors.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn overlap(&self, region: Region) -> usize {
        let mut filled = 0;
        for row in region.r1..region.r2 {
            for col in region.c1..region.c2 {
                if self.grid[row][col] != 0 {
                    filled += 1;
                }
            }
        }
        filled
    }

    fn touches_filled_cell(&self, region: Region) -> bool {
        let filled = |row: usize, col: usize| self.grid[row][col] != 0;
        for col in region.c1..region.c2 {
            if region.r1 > 0 && filled(region.r1 - 1, col) {
                return true;
            }
            if region.r2 < HEIGHT && filled(region.r2, col) {
                return true;
            }
        }
        for row in region.r1..region.r2 {
            if region.c1 > 0 && filled(row, region.c1 - 1) {
                return true;
            }
            if region.c2 < WIDTH && filled(row, region.c2) {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for &cell in row {
                match cell {
                    0 => write!(f, ".")?,
                    c => write!(f, "{c}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
