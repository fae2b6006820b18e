//! Optional TOML file with default options.
//!
//! The file is read once at startup and never written.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use segclock_core::{AccentColor, Options, Position, TickDelay, TimeFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::in_range;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SEGCLOCK_CONFIG";

/// Defaults read from `config.toml`. Unset keys keep the built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub seconds: Option<bool>,
    pub screensaver: Option<bool>,
    pub center: Option<bool>,
    pub color: Option<i64>,
    pub bold: Option<bool>,
    pub twelve_hour: Option<bool>,
    pub utc: Option<bool>,
    pub rebound: Option<bool>,
    pub date_format: Option<String>,
    pub delay: Option<i64>,
    pub nanos: Option<i64>,
    pub date: Option<bool>,
    pub blink: Option<bool>,
    pub boxed: Option<bool>,
    pub position: Option<i64>,
    pub no_quit: Option<bool>,
}

impl FileConfig {
    /// Load the defaults file. A missing file yields empty defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text, &path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Parse file contents; `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply the file values on top of `options`.
    pub fn apply(&self, options: &mut Options) {
        let flags = [
            (self.seconds, &mut options.show_seconds),
            (self.screensaver, &mut options.screensaver),
            (self.center, &mut options.centered),
            (self.bold, &mut options.bold),
            (self.utc, &mut options.utc),
            (self.rebound, &mut options.rebound),
            (self.date, &mut options.show_date),
            (self.blink, &mut options.blink_colon),
            (self.boxed, &mut options.boxed),
            (self.no_quit, &mut options.no_quit),
        ];
        for (value, slot) in flags {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(twelve) = self.twelve_hour {
            options.time_format = if twelve {
                TimeFormat::TwelveHour
            } else {
                TimeFormat::TwentyFourHour
            };
        }
        if let Some(color) = self
            .color
            .and_then(|c| in_range("color", c, 0..=i64::from(AccentColor::COUNT - 1)))
            .and_then(|c| u8::try_from(c).ok())
            .and_then(AccentColor::from_index)
        {
            options.color = color;
        }
        if let Some(format) = &self.date_format {
            options.date_format = format.clone();
        }
        if let Some(secs) = self
            .delay
            .and_then(|d| in_range("delay", d, 0..=TickDelay::MAX_SECS as i64))
        {
            options.tick_delay.secs = secs.unsigned_abs();
        }
        if let Some(nanos) = self
            .nanos
            .and_then(|n| in_range("nanos", n, 0..=i64::from(TickDelay::MAX_NANOS)))
            .and_then(|n| u32::try_from(n).ok())
        {
            options.tick_delay.nanos = nanos;
        }
        if let Some(position) = self
            .position
            .and_then(|p| u8::try_from(p).ok())
            .and_then(Position::new)
        {
            options.position = Some(position);
        }
    }
}

/// Location of the defaults file: `$SEGCLOCK_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "segclock").map(|dirs| dirs.config_dir().join("config.toml"))
}
