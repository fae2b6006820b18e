//! Frame geometry and terminal dimensions.

use ratatui::layout::Rect;

/// Height of the clock frame in rows.
pub const FRAME_HEIGHT: i32 = 7;
/// Frame width without seconds.
pub const NORMAL_WIDTH: i32 = 35;
/// Frame width with seconds.
pub const WIDE_WIDTH: i32 = 54;
/// Height of the date window in rows.
pub const DATE_WINDOW_HEIGHT: i32 = 3;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: i32,
    pub cols: i32,
}

impl TermSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            rows: i32::from(rows),
            cols: i32::from(cols),
        }
    }

    /// The whole terminal as a Ratatui area.
    pub fn area(self) -> Rect {
        Rect::new(0, 0, to_cells(self.cols), to_cells(self.rows))
    }
}

/// Position and size of a window, in terminal cells.
///
/// Signed so that layout arithmetic on a terminal smaller than the frame
/// stays representable; conversion to a [`Rect`] clips at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub row: i32,
    pub col: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(row: i32, col: i32, width: i32, height: i32) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            to_cells(self.col),
            to_cells(self.row),
            to_cells(self.width),
            to_cells(self.height),
        )
    }
}

/// Bounce direction of the frame, each component is +1 or -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub d_row: i32,
    pub d_col: i32,
}

impl Default for Velocity {
    fn default() -> Self {
        Self { d_row: 1, d_col: 1 }
    }
}

fn to_cells(v: i32) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}
