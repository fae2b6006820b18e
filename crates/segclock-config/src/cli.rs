//! Getopt-style command line flags.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use segclock_core::{AccentColor, Options, Position, TickDelay, TimeFormat};
use tracing::warn;

use crate::error::ConfigError;
use crate::in_range;

/// Longest accepted date format template, in characters.
const MAX_FORMAT_LEN: usize = 100;

pub const USAGE: &str = "\
usage: segclock [-iuvsScbtrhDBxn] [-C [0-7]] [-f format] [-d delay] [-a nsdelay] [-T tty] [-p [1-9]]
    -s            Show seconds
    -S            Screensaver mode
    -x            Show box
    -c            Center the clock in the terminal
    -C [0-7]      Set the clock color
    -b            Use bold colors
    -t            Use 12-hour format
    -u            Use UTC time
    -T tty        Display the clock on the given terminal device
    -r            Bounce the clock off the terminal edges
    -f format     Set the date format (strftime)
    -n            Don't quit on keypress
    -v            Show version
    -i            Show program info
    -h            Show this page
    -D            Hide date
    -B            Blink the colon
    -d delay      Seconds between two redraws, 0-99. Default 1.
    -a nsdelay    Additional nanoseconds between two redraws. Default 0.
    -p [1-9]      Position of the clock, 1-9 from top-left to bottom-right:

                  123
                  456
                  789
";

pub const VERSION: &str = concat!("segclock ", env!("CARGO_PKG_VERSION"), "\n");

pub const INFO: &str = concat!(
    "segclock ",
    env!("CARGO_PKG_VERSION"),
    ": a large seven-segment clock for the terminal.\n",
    "Keys: arrows/hjkl move, s seconds, t 12/24h, c center, b bold, r rebound, x box, 0-7 color, q quit.\n"
);

/// Raw command line. Numeric values stay strings until range-checked.
#[derive(Debug, Default, Parser)]
#[command(
    name = "segclock",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    #[arg(short = 's')]
    pub seconds: bool,
    #[arg(short = 'S')]
    pub screensaver: bool,
    #[arg(short = 'x')]
    pub boxed: bool,
    #[arg(short = 'c')]
    pub center: bool,
    #[arg(short = 'C', value_name = "0-7", allow_hyphen_values = true)]
    pub color: Option<String>,
    #[arg(short = 'b')]
    pub bold: bool,
    #[arg(short = 't')]
    pub twelve_hour: bool,
    #[arg(short = 'u')]
    pub utc: bool,
    #[arg(short = 'T', value_name = "tty")]
    pub tty: Option<PathBuf>,
    #[arg(short = 'r')]
    pub rebound: bool,
    #[arg(short = 'f', value_name = "format", allow_hyphen_values = true)]
    pub format: Option<String>,
    #[arg(short = 'n')]
    pub no_quit: bool,
    #[arg(short = 'v')]
    pub version: bool,
    #[arg(short = 'i')]
    pub info: bool,
    #[arg(short = 'h')]
    pub help: bool,
    #[arg(short = 'D')]
    pub hide_date: bool,
    #[arg(short = 'B')]
    pub blink: bool,
    #[arg(short = 'd', value_name = "delay", allow_hyphen_values = true)]
    pub delay: Option<String>,
    #[arg(short = 'a', value_name = "nsdelay", allow_hyphen_values = true)]
    pub nsdelay: Option<String>,
    #[arg(short = 'p', value_name = "1-9", allow_hyphen_values = true)]
    pub position: Option<String>,
    /// Non-option arguments are accepted and ignored.
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Text for `-h`, `-v` or `-i`, in that order of precedence.
    pub fn info_text(&self) -> Option<&'static str> {
        if self.help {
            Some(USAGE)
        } else if self.version {
            Some(VERSION)
        } else if self.info {
            Some(INFO)
        } else {
            None
        }
    }

    /// Apply the flags on top of `options`.
    ///
    /// Returns the validated `-T` device, if one was given.
    pub fn apply(self, options: &mut Options) -> Result<Option<PathBuf>, ConfigError> {
        options.show_seconds |= self.seconds;
        options.screensaver |= self.screensaver;
        options.boxed |= self.boxed;
        options.centered |= self.center;
        options.bold |= self.bold;
        options.utc |= self.utc;
        options.rebound |= self.rebound;
        options.no_quit |= self.no_quit;
        options.blink_colon |= self.blink;
        if self.hide_date {
            options.show_date = false;
        }
        if self.twelve_hour {
            options.time_format = TimeFormat::TwelveHour;
        }

        if let Some(color) = numeric::<u8>('C', self.color.as_deref())
            .and_then(|c| in_range("-C", c, 0..=AccentColor::COUNT - 1))
            .and_then(AccentColor::from_index)
        {
            options.color = color;
        }
        if let Some(format) = self.format {
            options.date_format = format.chars().take(MAX_FORMAT_LEN).collect();
        }
        if let Some(secs) = numeric::<u64>('d', self.delay.as_deref())
            .and_then(|d| in_range("-d", d, 0..=TickDelay::MAX_SECS))
        {
            options.tick_delay.secs = secs;
        }
        if let Some(nanos) = numeric::<u32>('a', self.nsdelay.as_deref())
            .and_then(|a| in_range("-a", a, 0..=TickDelay::MAX_NANOS))
        {
            options.tick_delay.nanos = nanos;
        }
        if let Some(position) = numeric::<u8>('p', self.position.as_deref()).and_then(Position::new)
        {
            options.position = Some(position);
        }

        self.tty.as_deref().map(validate_tty).transpose()
    }
}

/// Parse a flag value as a number, warning when it isn't one.
fn numeric<T: FromStr>(flag: char, raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(flag = %flag, value = raw, "ignoring non-numeric value");
    }
    parsed
}

/// Check that `path` names a character device.
pub fn validate_tty(path: &Path) -> Result<PathBuf, ConfigError> {
    let metadata = fs::metadata(path).map_err(|source| ConfigError::TtyStat {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_char_device(&metadata) {
        return Err(ConfigError::NotCharDevice {
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

#[cfg(unix)]
fn is_char_device(metadata: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    metadata.file_type().is_char_device()
}

#[cfg(not(unix))]
fn is_char_device(_metadata: &Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let cli = Cli::try_parse_from(std::iter::once("segclock").chain(args.iter().copied()))
            .expect("command line should parse");
        let mut options = Options::default();
        cli.apply(&mut options).expect("flags should apply");
        options
    }

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(parse(&[]), Options::default());
    }

    #[test]
    fn test_bundled_flags() {
        let options = parse(&["-scbx", "-D", "-tB"]);
        assert!(options.show_seconds);
        assert!(options.centered);
        assert!(options.bold);
        assert!(options.boxed);
        assert!(!options.show_date);
        assert!(options.blink_colon);
        assert_eq!(options.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_color_values() {
        assert_eq!(parse(&["-C3"]).color.index(), 3);
        assert_eq!(parse(&["-C", "0"]).color.index(), 0);
        assert_eq!(parse(&["-C", "8"]).color, AccentColor::default());
        assert_eq!(parse(&["-C", "-1"]).color, AccentColor::default());
        assert_eq!(parse(&["-C", "red"]).color, AccentColor::default());
        assert_eq!(parse(&["-C", "1", "-C", "4"]).color.index(), 4);
    }

    #[test]
    fn test_delay_bounds() {
        assert_eq!(parse(&["-d", "5"]).tick_delay.secs, 5);
        assert_eq!(parse(&["-d", "99"]).tick_delay.secs, 99);
        assert_eq!(parse(&["-d", "100"]).tick_delay.secs, 1);
        assert_eq!(parse(&["-d", "-3"]).tick_delay.secs, 1);

        assert_eq!(parse(&["-a", "999999999"]).tick_delay.nanos, 999_999_999);
        assert_eq!(parse(&["-a", "1000000000"]).tick_delay.nanos, 0);
        assert_eq!(parse(&["-a", "abc"]).tick_delay.nanos, 0);
    }

    #[test]
    fn test_position_bounds() {
        assert_eq!(parse(&["-p", "5"]).position, Position::new(5));
        assert_eq!(parse(&["-p", "0"]).position, None);
        assert_eq!(parse(&["-p", "10"]).position, None);
    }

    #[test]
    fn test_date_format() {
        assert_eq!(parse(&["-f", "%H:%M"]).date_format, "%H:%M");
        assert_eq!(parse(&["-f", &"y".repeat(150)]).date_format.len(), MAX_FORMAT_LEN);
    }

    #[test]
    fn test_info_precedence() {
        let cli = Cli::try_parse_from(["segclock", "-i", "-v"]).unwrap();
        assert_eq!(cli.info_text(), Some(VERSION));
        let cli = Cli::try_parse_from(["segclock", "-s"]).unwrap();
        assert_eq!(cli.info_text(), None);
    }

    #[test]
    fn test_extra_arguments_ignored() {
        assert!(parse(&["-s", "stray"]).show_seconds);
    }

    #[test]
    fn test_tty_must_exist() {
        let cli = Cli::try_parse_from(["segclock", "-T", "/no/such/segclock/tty"]).unwrap();
        let err = cli.apply(&mut Options::default()).unwrap_err();
        assert!(matches!(err, ConfigError::TtyStat { .. }));
    }

    #[test]
    fn test_tty_rejects_non_device() {
        let dir = std::env::temp_dir();
        let err = validate_tty(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::NotCharDevice { .. }));
        assert!(err.to_string().contains("doesn't appear to be a character device"));
    }

    #[cfg(unix)]
    #[test]
    fn test_tty_accepts_char_device() {
        let cli = Cli::try_parse_from(["segclock", "-T", "/dev/null"]).unwrap();
        let tty = cli.apply(&mut Options::default()).unwrap();
        assert_eq!(tty, Some(PathBuf::from("/dev/null")));
    }
}
