//! Replays a full recorded game against the board rules and the scorer.
//!
//! The fixture is a greedy self-play game: every move was legal when it
//! was made, and after the last one no candidate region can take a tile.

use box_arbiter::board::{Board, Grid, OPENING_PLACEMENT};
use box_arbiter::protocol::{Move, SecretColors, Tile, COLORS, HEIGHT, WIDTH};
use box_arbiter::scorer;

const FIXTURE_MOVES: [&str; 37] = [
    "Ij346152h", "Jl123564h", "Kn365412h", "Ll623154h", "Mn645123h", "Nl342561h",
    "On536214h", "Oi641325h", "Oe562134h", "Oa465132h", "Mh213456h", "Md125463h",
    "Lb326415h", "Kh156324h", "Je325641h", "Ja652143v", "Is216453v", "Ib431652h",
    "Hm134265h", "Go612435h", "Gf613254h", "Gb352614h", "Fm132645h", "Eo452613h",
    "Ej341562h", "Ef324561h", "Eb564231h", "Ca416325v", "Ca514362h", "Ce142536h",
    "Ci325164h", "Cm521634h", "Bo645231h", "Am345621h", "Ai653421h", "Ae631425h",
    "Aa126354h",
];

const FINAL_GRID: [&str; 16] = [
    "12635414253421562100",
    "45362141364356654331",
    "51431425325152132546",
    "26346352461543612500",
    "36642314561156252613",
    "63324655423514316254",
    "12526143254054623135",
    "45162532316513534216",
    "04316526534656243132",
    "32561346415123564051",
    "45001465233243654146",
    "12264154236513154664",
    "21146236334566451215",
    "54036452143122561423",
    "63513221341325362140",
    "23156412653146126350",
];

fn replay() -> Board {
    let mut board = Board::new(Tile::new([1, 2, 3, 4, 5, 6]), OPENING_PLACEMENT);
    for token in FIXTURE_MOVES {
        let mv: Move = token.parse().unwrap();
        assert!(!board.is_game_over(), "game ended before {token}");
        assert!(board.can_place(mv.placement), "{token} became illegal");
        board.place(mv.tile, mv.placement);
    }
    board
}

/// All candidate rectangles as `(r1, c1, r2, c2)`, enumerated separately
/// from the board's own list.
fn rectangles() -> Vec<(usize, usize, usize, usize)> {
    let mut rects = Vec::new();
    for r in 0..HEIGHT {
        for c in 0..WIDTH {
            for (rows, cols) in [(2, COLORS), (COLORS, 2)] {
                if r + rows <= HEIGHT && c + cols <= WIDTH {
                    rects.push((r, c, r + rows, c + cols));
                }
            }
        }
    }
    rects
}

fn overlap(grid: &Grid, rect: (usize, usize, usize, usize)) -> usize {
    let (r1, c1, r2, c2) = rect;
    (r1..r2)
        .flat_map(|r| (c1..c2).map(move |c| (r, c)))
        .filter(|&(r, c)| grid[r][c] != 0)
        .count()
}

#[test]
fn replay_ends_the_game_on_the_recorded_grid() {
    let board = replay();
    assert!(board.is_game_over());
    for (row, expected) in FINAL_GRID.iter().enumerate() {
        for (col, digit) in expected.bytes().enumerate() {
            assert_eq!(
                board.grid()[row][col],
                digit - b'0',
                "cell ({row}, {col})"
            );
        }
    }
}

#[test]
fn replay_scores_match_the_recorded_game() {
    let board = replay();
    let per_color: Vec<u32> = (1..=COLORS as u8)
        .map(|color| scorer::score_color(board.grid(), color))
        .collect();
    assert_eq!(per_color, [12, 0, 7, 0, 7, 0]);
    assert_eq!(scorer::score_secrets(board.grid(), SecretColors([3, 5])), [7, 7]);
    assert_eq!(scorer::score_secrets(board.grid(), SecretColors([1, 2])), [12, 0]);
}

#[test]
fn rectangle_overlap_never_decreases() {
    let rects = rectangles();
    assert_eq!(rects.len(), 434);

    let mut board = Board::new(Tile::new([1, 2, 3, 4, 5, 6]), OPENING_PLACEMENT);
    let mut previous: Vec<usize> = rects.iter().map(|&r| overlap(board.grid(), r)).collect();
    for token in FIXTURE_MOVES {
        let mv: Move = token.parse().unwrap();
        board.place(mv.tile, mv.placement);
        for (index, &rect) in rects.iter().enumerate() {
            let now = overlap(board.grid(), rect);
            assert!(now >= previous[index], "overlap shrank at {rect:?}");
            previous[index] = now;
        }
    }
}
