//! Core types for the segclock terminal clock.
//!
//! [`ClockState`] is the single mutable aggregate of the application. It owns
//! the current time fields, the frame and date window geometry and the display
//! options, and it is the only place where geometry changes are applied.

mod geometry;
mod layout;
mod motion;
mod options;
mod state;
mod time;

pub use geometry::{
    DATE_WINDOW_HEIGHT, FRAME_HEIGHT, Geometry, NORMAL_WIDTH, TermSize, Velocity, WIDE_WIDTH,
};
pub use layout::Direction;
pub use motion::reflect;
pub use options::{AccentColor, Options, Position, TickDelay, TimeFormat};
pub use state::ClockState;
pub use time::{ClockTime, MAX_DATE_LEN, Meridiem, now};
