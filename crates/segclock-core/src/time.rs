//! Wall-clock time split into the digits the clock face displays.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use ratatui::text::Line;

use crate::options::TimeFormat;

/// Longest date text kept, in characters.
pub const MAX_DATE_LEN: usize = 127;

/// Half of the day in 12-hour mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Suffix appended to the date line.
    pub fn marker(self) -> &'static str {
        match self {
            Meridiem::Am => " [AM]",
            Meridiem::Pm => " [PM]",
        }
    }
}

/// Current time fields, each split into tens and units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: [u8; 2],
    pub minute: [u8; 2],
    pub second: [u8; 2],
    pub meridiem: Option<Meridiem>,
    /// Formatted date followed by the meridiem marker, if any.
    pub date: String,
    /// Unix timestamp the fields were taken from.
    pub timestamp: i64,
}

impl ClockTime {
    /// Split `now` into display digits and format the date line.
    ///
    /// In 12-hour mode hour 0 reads as 12 AM and hours past noon wrap to 1-11 PM.
    pub fn from_datetime(
        now: &DateTime<FixedOffset>,
        time_format: TimeFormat,
        date_format: &str,
    ) -> Self {
        let hour24 = now.hour();
        let (hour, meridiem) = match time_format {
            TimeFormat::TwentyFourHour => (hour24, None),
            TimeFormat::TwelveHour => {
                let meridiem = if hour24 >= 12 {
                    Meridiem::Pm
                } else {
                    Meridiem::Am
                };
                let hour = match hour24 {
                    0 => 12,
                    h if h > 12 => h - 12,
                    h => h,
                };
                (hour, Some(meridiem))
            }
        };

        let mut date = format_date(now, date_format);
        if let Some(meridiem) = meridiem {
            date.push_str(meridiem.marker());
        }

        Self {
            hour: split_digits(hour),
            minute: split_digits(now.minute()),
            second: split_digits(now.second()),
            meridiem,
            date,
            timestamp: now.timestamp(),
        }
    }

    /// Display width of the date line in terminal columns.
    pub fn date_width(&self) -> usize {
        Line::raw(self.date.as_str()).width()
    }

    pub fn is_even_second(&self) -> bool {
        self.timestamp.rem_euclid(2) == 0
    }
}

/// Current wall-clock time, in UTC or in the local zone.
pub fn now(utc: bool) -> DateTime<FixedOffset> {
    if utc {
        Utc::now().fixed_offset()
    } else {
        Local::now().fixed_offset()
    }
}

fn split_digits(value: u32) -> [u8; 2] {
    let value = value.min(99) as u8;
    [value / 10, value % 10]
}

/// Format `now` with a strftime template. An unusable template is shown as-is.
fn format_date(now: &DateTime<FixedOffset>, template: &str) -> String {
    let mut date = String::new();
    if write!(date, "{}", now.format(template)).is_err() {
        date.clear();
        date.push_str(template);
    }
    if date.chars().count() > MAX_DATE_LEN {
        date = date.chars().take(MAX_DATE_LEN).collect();
    }
    date
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_twenty_four_hour_digits() {
        let time = ClockTime::from_datetime(&at(0, 7, 59), TimeFormat::TwentyFourHour, "%F");
        assert_eq!(time.hour, [0, 0]);
        assert_eq!(time.minute, [0, 7]);
        assert_eq!(time.second, [5, 9]);
        assert_eq!(time.meridiem, None);
        assert_eq!(time.date, "2024-03-09");

        let time = ClockTime::from_datetime(&at(23, 0, 0), TimeFormat::TwentyFourHour, "%F");
        assert_eq!(time.hour, [2, 3]);
    }

    #[test]
    fn test_twelve_hour_digits() {
        let midnight = ClockTime::from_datetime(&at(0, 0, 0), TimeFormat::TwelveHour, "%F");
        assert_eq!(midnight.hour, [1, 2]);
        assert_eq!(midnight.meridiem, Some(Meridiem::Am));
        assert_eq!(midnight.date, "2024-03-09 [AM]");

        let noon = ClockTime::from_datetime(&at(12, 0, 0), TimeFormat::TwelveHour, "%F");
        assert_eq!(noon.hour, [1, 2]);
        assert_eq!(noon.meridiem, Some(Meridiem::Pm));

        let afternoon = ClockTime::from_datetime(&at(13, 30, 0), TimeFormat::TwelveHour, "%F");
        assert_eq!(afternoon.hour, [0, 1]);
        assert_eq!(afternoon.meridiem, Some(Meridiem::Pm));
        assert_eq!(afternoon.date, "2024-03-09 [PM]");
    }

    #[test]
    fn test_custom_date_format() {
        let time = ClockTime::from_datetime(&at(8, 0, 0), TimeFormat::TwentyFourHour, "%d/%m %H");
        assert_eq!(time.date, "09/03 08");
        assert_eq!(time.date_width(), 8);
    }

    #[test]
    fn test_invalid_date_format_is_kept_verbatim() {
        let time = ClockTime::from_datetime(&at(8, 0, 0), TimeFormat::TwentyFourHour, "%Q");
        assert_eq!(time.date, "%Q");
    }

    #[test]
    fn test_long_date_is_truncated() {
        let template = "x".repeat(300);
        let time = ClockTime::from_datetime(&at(8, 0, 0), TimeFormat::TwentyFourHour, &template);
        assert_eq!(time.date.len(), MAX_DATE_LEN);
    }

    #[test]
    fn test_even_second() {
        let even = ClockTime::from_datetime(&at(8, 0, 4), TimeFormat::TwentyFourHour, "%F");
        let odd = ClockTime::from_datetime(&at(8, 0, 5), TimeFormat::TwentyFourHour, "%F");
        assert!(even.is_even_second());
        assert!(!odd.is_even_second());
    }
}
