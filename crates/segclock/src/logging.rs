//! Opt-in file logging.
//!
//! The terminal belongs to the clock, so events go to a file. Nothing is
//! installed unless `SEGCLOCK_LOG` holds a filter such as `debug`.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `segclock_core=trace,info`.
const LOG_ENV: &str = "SEGCLOCK_LOG";
/// Explicit log file path.
const LOG_FILE_ENV: &str = "SEGCLOCK_LOG_FILE";

pub fn init() -> color_eyre::Result<()> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    let path = log_path()
        .ok_or_else(|| eyre!("no cache directory for the log file, set {LOG_FILE_ENV}"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("couldn't open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("{err}"))?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

fn log_path() -> Option<PathBuf> {
    env::var_os(LOG_FILE_ENV).map(PathBuf::from).or_else(|| {
        ProjectDirs::from("", "", "segclock").map(|dirs| dirs.cache_dir().join("segclock.log"))
    })
}
