//! Rebound: the frame drifts diagonally and bounces off the terminal edges.

use crate::geometry::{DATE_WINDOW_HEIGHT, Geometry};
use crate::state::ClockState;

/// Reflect one velocity component.
///
/// Turns positive below 1 and negative past `upper`; the upper bound wins when
/// both hold.
pub fn reflect(position: i32, velocity: i32, upper: i32) -> i32 {
    let mut velocity = velocity;
    if position < 1 {
        velocity = 1;
    }
    if position > upper {
        velocity = -1;
    }
    velocity
}

impl ClockState {
    /// Advance the bounce by one cell. Returns `false` when rebound is off.
    pub fn rebound_step(&mut self) -> bool {
        if !self.options.rebound {
            return false;
        }
        let g = self.geometry;
        self.velocity.d_row = reflect(
            g.row,
            self.velocity.d_row,
            self.term.rows - g.height - DATE_WINDOW_HEIGHT,
        );
        self.velocity.d_col = reflect(g.col, self.velocity.d_col, self.term.cols - g.width - 1);
        self.move_and_resize(Geometry {
            row: g.row + self.velocity.d_row,
            col: g.col + self.velocity.d_col,
            ..g
        });
        true
    }
}
