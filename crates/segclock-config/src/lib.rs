//! Configuration for segclock.
//!
//! Options come from an optional TOML defaults file and from getopt-style
//! command line flags, in that order. Out-of-range values are ignored and
//! leave the previous value in place.

mod cli;
mod error;
mod file;

use std::ffi::OsString;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;
use segclock_core::Options;
use tracing::warn;

pub use cli::{Cli, INFO, USAGE, VERSION, validate_tty};
pub use error::ConfigError;
pub use file::{FileConfig, config_path};

/// What the program should do after reading its configuration.
#[derive(Debug)]
pub enum Launch {
    /// Start the clock.
    Run(Settings),
    /// Print informational text and exit successfully.
    Print(&'static str),
}

/// Resolved startup settings.
#[derive(Debug)]
pub struct Settings {
    pub options: Options,
    /// Alternate terminal device, already checked to be a character device.
    pub tty: Option<PathBuf>,
}

/// Parse the command line, read the defaults file and resolve the settings.
pub fn load<I, T>(args: I) -> Result<Launch, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            warn!(error = %err, "unusable command line");
            return Ok(Launch::Print(USAGE));
        }
    };
    if let Some(text) = cli.info_text() {
        return Ok(Launch::Print(text));
    }
    let file = FileConfig::load()?;
    resolve(cli, &file)
}

/// Layer the command line over the file defaults.
pub fn resolve(cli: Cli, file: &FileConfig) -> Result<Launch, ConfigError> {
    let mut options = Options::default();
    file.apply(&mut options);
    let tty = cli.apply(&mut options)?;
    Ok(Launch::Run(Settings { options, tty }))
}

/// Keep `value` only when it lies in `range`.
pub(crate) fn in_range<T>(name: &str, value: T, range: RangeInclusive<T>) -> Option<T>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Some(value)
    } else {
        warn!(option = name, %value, "ignoring out of range value");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_flags_print() {
        for (flag, text) in [("-h", USAGE), ("-v", VERSION), ("-i", INFO)] {
            match load(["segclock", "-s", flag]) {
                Ok(Launch::Print(printed)) => assert_eq!(printed, text),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_command_line_prints_usage() {
        for args in [vec!["segclock", "-z"], vec!["segclock", "-C"]] {
            match load(args) {
                Ok(Launch::Print(printed)) => assert_eq!(printed, USAGE),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            color: Some(4),
            seconds: Some(true),
            date_format: Some("%A".to_string()),
            ..FileConfig::default()
        };
        let cli = Cli::try_parse_from(["segclock", "-C", "6"]).unwrap();
        let Ok(Launch::Run(settings)) = resolve(cli, &file) else {
            panic!("expected settings");
        };
        assert_eq!(settings.options.color.index(), 6);
        assert!(settings.options.show_seconds);
        assert_eq!(settings.options.date_format, "%A");
        assert!(settings.tty.is_none());
    }

    #[test]
    fn test_in_range() {
        assert_eq!(in_range("d", 5u64, 0..=99), Some(5));
        assert_eq!(in_range("d", 100u64, 0..=99), None);
    }
}
