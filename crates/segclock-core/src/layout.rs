//! Placement of the frame and date windows.

use tracing::{debug, trace};

use crate::geometry::{DATE_WINDOW_HEIGHT, Geometry, TermSize};
use crate::options::Position;
use crate::state::{ClockState, frame_width};

/// Keyboard move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl ClockState {
    /// Move and resize the frame, then rebuild the date window around it.
    ///
    /// Every geometry change goes through here. The origin is clamped to
    /// `[0, rows - height] x [0, cols - width]`.
    pub fn move_and_resize(&mut self, target: Geometry) {
        let max_row = (self.term.rows - target.height).max(0);
        let max_col = (self.term.cols - target.width).max(0);
        let frame = Geometry {
            row: target.row.clamp(0, max_row),
            col: target.col.clamp(0, max_col),
            ..target
        };

        let date_len = i32::try_from(self.time.date_width()).unwrap_or(i32::MAX / 2);
        self.geometry = frame;
        self.date_area = Geometry::new(
            frame.row + frame.height - 1,
            frame.col + frame.width / 2 - date_len / 2 - 1,
            date_len + 2,
            DATE_WINDOW_HEIGHT,
        );
        trace!(?frame, date = ?self.date_area, "frame moved");
    }

    /// Center the frame in the terminal and stop any rebound.
    pub fn center(&mut self) {
        self.set_centered(true);
    }

    /// Turn centering on or off. Turning it off leaves the frame where it is.
    pub fn set_centered(&mut self, centered: bool) {
        self.options.centered = centered;
        if !centered {
            return;
        }
        self.options.rebound = false;
        let g = self.geometry;
        self.move_and_resize(Geometry {
            row: self.term.rows / 2 - g.height / 2,
            col: self.term.cols / 2 - g.width / 2,
            ..g
        });
    }

    /// Snap the frame to one of the nine keypad anchors.
    pub fn apply_position(&mut self, position: Position) {
        self.options.rebound = false;
        let g = self.geometry;
        let TermSize { rows, cols } = self.term;
        let row = match position.row_slot() {
            0 => 0,
            1 => rows / 2 - g.height / 2,
            _ => rows - g.height - 2,
        };
        let col = match position.col_slot() {
            0 => 0,
            1 => cols / 2 - g.width / 2,
            _ => cols - g.width,
        };
        self.move_and_resize(Geometry { row, col, ..g });
    }

    /// Show or hide the seconds, keeping the wider frame on screen.
    pub fn toggle_seconds(&mut self) {
        self.options.show_seconds = !self.options.show_seconds;
        let width = frame_width(self.options.show_seconds);
        let g = self.geometry;
        let col = g.col.min(self.term.cols - width - 1);
        self.move_and_resize(Geometry { col, width, ..g });
        self.reapply_anchor();
        debug!(show_seconds = self.options.show_seconds, "toggled seconds");
    }

    /// Switch the border style. The frame does not move.
    pub fn toggle_box(&mut self) {
        self.options.boxed = !self.options.boxed;
        debug!(boxed = self.options.boxed, "toggled box");
    }

    /// Move the frame by one cell. Ignored while centered or at an edge.
    pub fn nudge(&mut self, direction: Direction) {
        if self.options.centered {
            return;
        }
        let g = self.geometry;
        let TermSize { rows, cols } = self.term;
        let target = match direction {
            Direction::Up if g.row >= 1 => Geometry { row: g.row - 1, ..g },
            Direction::Down if g.row <= rows - g.height - DATE_WINDOW_HEIGHT => Geometry {
                row: g.row + 1,
                ..g
            },
            Direction::Left if g.col >= 1 => Geometry { col: g.col - 1, ..g },
            Direction::Right if g.col <= cols - g.width - 1 => Geometry {
                col: g.col + 1,
                ..g
            },
            _ => return,
        };
        self.move_and_resize(target);
    }

    /// Adopt a new terminal size and lay the clock out again.
    pub fn resize(&mut self, term: TermSize) {
        debug!(rows = term.rows, cols = term.cols, "terminal resized");
        self.term = term;
        self.move_and_resize(self.geometry);
        self.reapply_anchor();
    }
}
