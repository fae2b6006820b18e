//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop segclock before the terminal is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't stat '{}': {source}", .path.display())]
    TtyStat { path: PathBuf, source: io::Error },

    #[error("'{}' doesn't appear to be a character device", .path.display())]
    NotCharDevice { path: PathBuf },

    #[error("couldn't read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
