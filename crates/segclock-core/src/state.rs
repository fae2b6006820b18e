//! The clock's mutable state.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::geometry::{FRAME_HEIGHT, Geometry, NORMAL_WIDTH, TermSize, Velocity, WIDE_WIDTH};
use crate::options::{AccentColor, Options};
use crate::time::ClockTime;

/// Time fields, geometry and options of the running clock.
///
/// Constructed once at startup and mutated in place every tick and every
/// keypress. Geometry only ever changes through
/// [`move_and_resize`](Self::move_and_resize).
#[derive(Debug, Clone)]
pub struct ClockState {
    pub(crate) time: ClockTime,
    /// Main frame holding the digits.
    pub(crate) geometry: Geometry,
    /// Date window, derived from the frame and the date text.
    pub(crate) date_area: Geometry,
    pub(crate) velocity: Velocity,
    pub(crate) options: Options,
    pub(crate) term: TermSize,
}

impl ClockState {
    /// Build the state from parsed options and place the frame.
    ///
    /// The frame starts at the origin, then centering or the numeric position
    /// is applied; either one turns rebound off.
    pub fn new(options: Options, term: TermSize, now: &DateTime<FixedOffset>) -> Self {
        let time = ClockTime::from_datetime(now, options.time_format, &options.date_format);
        let geometry = Geometry::new(0, 0, frame_width(options.show_seconds), FRAME_HEIGHT);
        let mut state = Self {
            time,
            geometry,
            date_area: Geometry::default(),
            velocity: Velocity::default(),
            options,
            term,
        };
        state.move_and_resize(geometry);
        state.reapply_anchor();
        state
    }

    /// Refresh the time fields from the wall clock.
    ///
    /// The date window follows its text, so a change in the date width goes
    /// through a relayout at the current geometry.
    pub fn tick(&mut self, now: &DateTime<FixedOffset>) {
        let previous_width = self.time.date_width();
        self.refresh_time(now);
        if self.time.date_width() != previous_width {
            self.move_and_resize(self.geometry);
        }
    }

    pub fn time(&self) -> &ClockTime {
        &self.time
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn date_area(&self) -> Geometry {
        self.date_area
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the colon is drawn in its dimmed phase this tick.
    pub fn colon_dimmed(&self) -> bool {
        self.options.blink_colon && self.time.is_even_second()
    }

    pub fn toggle_bold(&mut self) {
        self.options.bold = !self.options.bold;
        debug!(bold = self.options.bold, "toggled bold");
    }

    /// Toggle the bounce animation. Enabling it stops centering.
    pub fn toggle_rebound(&mut self) {
        self.options.rebound = !self.options.rebound;
        if self.options.rebound && self.options.centered {
            self.options.centered = false;
        }
        debug!(rebound = self.options.rebound, "toggled rebound");
    }

    /// Switch between 12 and 24 hour display.
    ///
    /// The meridiem marker changes the date width, so the date window is laid
    /// out again.
    pub fn toggle_time_format(&mut self, now: &DateTime<FixedOffset>) {
        self.options.time_format = self.options.time_format.toggle();
        self.refresh_time(now);
        self.move_and_resize(self.geometry);
        debug!(time_format = ?self.options.time_format, "toggled time format");
    }

    pub fn set_color(&mut self, color: AccentColor) {
        self.options.color = color;
        debug!(color = color.index(), "accent color changed");
    }

    /// Reapply centering, or the numeric position when not centered.
    pub(crate) fn reapply_anchor(&mut self) {
        if self.options.centered {
            self.center();
        } else if let Some(position) = self.options.position {
            self.apply_position(position);
        }
    }

    fn refresh_time(&mut self, now: &DateTime<FixedOffset>) {
        self.time =
            ClockTime::from_datetime(now, self.options.time_format, &self.options.date_format);
    }
}

/// Frame width for the given seconds setting.
pub(crate) fn frame_width(show_seconds: bool) -> i32 {
    if show_seconds {
        WIDE_WIDTH
    } else {
        NORMAL_WIDTH
    }
}
