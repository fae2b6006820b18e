//! Seven-segment glyphs for the segclock clock face.
//!
//! Each digit is a 3 x 5 grid of cells. A cell is painted two terminal
//! columns wide to keep the digits from looking squashed, so a digit covers
//! 6 columns by 5 rows.

use segclock_core::NORMAL_WIDTH;

/// Number of logical cells in a glyph.
pub const GLYPH_CELLS: usize = 15;
/// Terminal columns covered by a digit.
pub const DIGIT_WIDTH: u16 = 6;
/// Terminal rows covered by a digit.
pub const DIGIT_HEIGHT: u16 = 5;

/// Frame row of the top of every digit.
pub const DIGIT_ROW: u16 = 1;
/// Frame columns of the hour tens and units.
pub const HOUR_COLS: [u16; 2] = [1, 8];
/// Frame columns of the minute tens and units.
pub const MINUTE_COLS: [u16; 2] = [20, 27];
/// Frame columns of the second tens and units.
pub const SECOND_COLS: [u16; 2] = [39, 46];
/// Frame rows of the two colon dots.
pub const COLON_ROWS: [u16; 2] = [2, 4];
/// Colon between hours and minutes.
pub const HOUR_COLON_COL: u16 = 16;
/// Colon between minutes and seconds.
pub const SECOND_COLON_COL: u16 = NORMAL_WIDTH as u16;
/// Width of a colon dot.
pub const COLON_WIDTH: u16 = 2;

/// Glyph cells of each digit, row-major, `true` for a lit cell.
#[rustfmt::skip]
static DIGITS: [[bool; GLYPH_CELLS]; 10] = {
    const X: bool = true;
    const O: bool = false;
    [
        [X, X, X,  X, O, X,  X, O, X,  X, O, X,  X, X, X], // 0
        [O, O, X,  O, O, X,  O, O, X,  O, O, X,  O, O, X], // 1
        [X, X, X,  O, O, X,  X, X, X,  X, O, O,  X, X, X], // 2
        [X, X, X,  O, O, X,  X, X, X,  O, O, X,  X, X, X], // 3
        [X, O, X,  X, O, X,  X, X, X,  O, O, X,  O, O, X], // 4
        [X, X, X,  X, O, O,  X, X, X,  O, O, X,  X, X, X], // 5
        [X, X, X,  X, O, O,  X, X, X,  X, O, X,  X, X, X], // 6
        [X, X, X,  O, O, X,  O, O, X,  O, O, X,  O, O, X], // 7
        [X, X, X,  X, O, X,  X, X, X,  X, O, X,  X, X, X], // 8
        [X, X, X,  X, O, X,  X, X, X,  O, O, X,  X, X, X], // 9
    ]
};

/// Glyph cells of `digit`, `None` outside 0-9.
pub fn glyph_cells(digit: u8) -> Option<&'static [bool; GLYPH_CELLS]> {
    DIGITS.get(usize::from(digit))
}

/// A single terminal cell of a rendered digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    /// Row offset from the digit origin.
    pub row: u16,
    /// Column offset from the digit origin.
    pub col: u16,
    pub lit: bool,
}

/// Walk the 30 terminal cells of `digit`, row by row.
pub fn footprint(digit: u8) -> Option<impl Iterator<Item = GlyphCell>> {
    let cells = glyph_cells(digit)?;
    let cell_count = DIGIT_WIDTH * DIGIT_HEIGHT;
    Some((0..cell_count).map(move |i| GlyphCell {
        row: i / DIGIT_WIDTH,
        col: i % DIGIT_WIDTH,
        lit: cells[usize::from(i / 2)],
    }))
}
