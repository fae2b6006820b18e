//! Display options seeded from the command line and toggled from the keyboard.

use std::time::Duration;

use ratatui::style::Color;

/// Time format for the clock display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }
}

/// One of the eight ANSI accent colors, addressed by index 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor(u8);

impl AccentColor {
    pub const COUNT: u8 = 8;

    /// Build an accent from its index, `None` outside 0-7.
    pub fn from_index(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// Accent selected by a digit key, `None` for anything but `'0'..='7'`.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::from_index)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Convert the accent to a Ratatui color.
    pub fn color(self) -> Color {
        match self.0 {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            _ => Color::White,
        }
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self(2)
    }
}

/// Numeric-keypad anchor, 1 (top-left) through 9 (bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(u8);

impl Position {
    pub fn new(p: u8) -> Option<Self> {
        (1..=9).contains(&p).then_some(Self(p))
    }

    /// Row slot: 0 top, 1 middle, 2 bottom.
    pub fn row_slot(self) -> u8 {
        (self.0 - 1) / 3
    }

    /// Column slot: 0 left, 1 center, 2 right.
    pub fn col_slot(self) -> u8 {
        (self.0 - 1) % 3
    }
}

/// Delay between two redraws of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDelay {
    pub secs: u64,
    pub nanos: u32,
}

impl TickDelay {
    pub const MAX_SECS: u64 = 99;
    pub const MAX_NANOS: u32 = 999_999_999;

    pub fn as_duration(self) -> Duration {
        Duration::new(self.secs, self.nanos)
    }
}

impl Default for TickDelay {
    fn default() -> Self {
        Self { secs: 1, nanos: 0 }
    }
}

/// Display options of the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub show_seconds: bool,
    pub show_date: bool,
    pub centered: bool,
    pub boxed: bool,
    pub bold: bool,
    pub blink_colon: bool,
    pub rebound: bool,
    pub utc: bool,
    pub screensaver: bool,
    pub no_quit: bool,
    pub time_format: TimeFormat,
    pub color: AccentColor,
    /// Numeric anchor; `None` means free placement.
    pub position: Option<Position>,
    /// strftime-style template for the date line.
    pub date_format: String,
    pub tick_delay: TickDelay,
}

impl Options {
    pub const DEFAULT_DATE_FORMAT: &'static str = "%F";
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_seconds: false,
            show_date: true,
            centered: false,
            boxed: false,
            bold: false,
            blink_colon: false,
            rebound: false,
            utc: false,
            screensaver: false,
            no_quit: false,
            time_format: TimeFormat::default(),
            color: AccentColor::default(),
            position: None,
            date_format: Self::DEFAULT_DATE_FORMAT.to_string(),
            tick_delay: TickDelay::default(),
        }
    }
}
