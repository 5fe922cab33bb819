//! Wire protocol spoken with player processes.
//!
//! Every exchange is one text line. The tokens are:
//!
//! - a secret color: a single digit in `1..=6`;
//! - a tile: [`COLORS`] distinct digits, e.g. `326451`;
//! - a placement: row letter (`A..=P`), column letter (`a..=t`) and an
//!   orientation letter (`h`/`v`), e.g. `Fch`;
//! - a tile placement: row and column letters, the tile digits, then the
//!   orientation letter, e.g. `Fc326451h`;
//! - the control lines [`START_LINE`] and [`QUIT_LINE`].
//!
//! The grid dimensions live here because they define the coordinate
//! alphabet: one row letter per row, one column letter per column.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of grid rows (rows are lettered `A..=P`).
pub const HEIGHT: usize = 16;
/// Number of grid columns (columns are lettered `a..=t`).
pub const WIDTH: usize = 20;
/// Number of colors; tiles are permutations of `1..=COLORS`.
pub const COLORS: usize = 6;

/// Sent to the seat that moves first, instead of a previous move.
pub const START_LINE: &str = "Start";
/// Sent to both seats once the match outcome is fixed.
pub const QUIT_LINE: &str = "Quit";

/// A malformed protocol token, carrying the rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed token {0:?}")]
pub struct TokenError(pub String);

/// The two ways a tile rectangle can lie on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 2 rows by [`COLORS`] columns.
    Horizontal,
    /// [`COLORS`] rows by 2 columns.
    Vertical,
}

impl Orientation {
    /// Rectangle size as (rows, columns).
    pub fn extent(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (2, COLORS),
            Orientation::Vertical => (COLORS, 2),
        }
    }

    fn as_char(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// Anchor cell plus orientation; identifies the rectangle a tile occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Anchor row (top of the rectangle).
    pub row: usize,
    /// Anchor column (left of the rectangle).
    pub col: usize,
    /// Rectangle orientation.
    pub orientation: Orientation,
}

impl FromStr for Placement {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TokenError(s.to_owned());
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(err());
        }
        let row = bytes[0].wrapping_sub(b'A') as usize;
        let col = bytes[1].wrapping_sub(b'a') as usize;
        if row >= HEIGHT || col >= WIDTH {
            return Err(err());
        }
        let orientation = match bytes[2] {
            b'h' => Orientation::Horizontal,
            b'v' => Orientation::Vertical,
            _ => return Err(err()),
        };
        Ok(Placement {
            row,
            col,
            orientation,
        })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            (b'A' + self.row as u8) as char,
            (b'a' + self.col as u8) as char,
            self.orientation.as_char()
        )
    }
}

/// A tile: a permutation of the colors `1..=COLORS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile([u8; COLORS]);

impl Tile {
    /// Builds a tile from explicit colors. Panics if `colors` is not a
    /// permutation of `1..=COLORS`; use the parser for untrusted input.
    pub fn new(colors: [u8; COLORS]) -> Tile {
        let mut seen = [false; COLORS + 1];
        for &c in &colors {
            assert!(
                (1..=COLORS as u8).contains(&c) && !seen[c as usize],
                "not a color permutation: {colors:?}"
            );
            seen[c as usize] = true;
        }
        Tile(colors)
    }

    /// Draws a uniformly random tile from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Tile {
        let mut colors = [0u8; COLORS];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = i as u8 + 1;
        }
        colors.shuffle(rng);
        Tile(colors)
    }

    /// The tile's colors in placement order.
    pub fn colors(&self) -> &[u8; COLORS] {
        &self.0
    }
}

impl FromStr for Tile {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TokenError(s.to_owned());
        let bytes = s.as_bytes();
        if bytes.len() != COLORS {
            return Err(err());
        }
        let mut colors = [0u8; COLORS];
        let mut seen = [false; COLORS + 1];
        for (slot, &b) in colors.iter_mut().zip(bytes) {
            if !(b'1'..=b'0' + COLORS as u8).contains(&b) {
                return Err(err());
            }
            let color = b - b'0';
            if seen[color as usize] {
                return Err(err());
            }
            seen[color as usize] = true;
            *slot = color;
        }
        Ok(Tile(colors))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A tile together with where it was (or should be) placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// The placed tile.
    pub tile: Tile,
    /// Where it goes.
    pub placement: Placement,
}

impl FromStr for Move {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TokenError(s.to_owned());
        let bytes = s.as_bytes();
        if bytes.len() != COLORS + 3 || !s.is_ascii() {
            return Err(err());
        }
        let placement_token = format!(
            "{}{}{}",
            bytes[0] as char,
            bytes[1] as char,
            bytes[bytes.len() - 1] as char
        );
        let placement = placement_token.parse().map_err(|_| err())?;
        let tile = s[2..s.len() - 1].parse().map_err(|_| err())?;
        Ok(Move { tile, placement })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            (b'A' + self.placement.row as u8) as char,
            (b'a' + self.placement.col as u8) as char,
            self.tile,
            self.placement.orientation.as_char()
        )
    }
}

/// The two secret colors of a match, one per seat, always distinct.
///
/// Each seat is told only its own color; the pair appears together only in
/// the transcript header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretColors(pub [u8; 2]);

impl SecretColors {
    /// Draws two distinct secret colors from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> SecretColors {
        let mut colors = [0u8; COLORS];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = i as u8 + 1;
        }
        colors.shuffle(rng);
        SecretColors([colors[0], colors[1]])
    }

    /// The color privately assigned to `seat` (0 or 1).
    pub fn seat(&self, seat: usize) -> u8 {
        self.0[seat]
    }
}

impl fmt::Display for SecretColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}
