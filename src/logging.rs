//! File-based tracing setup
//!
//! The TUI owns stdout/stderr, so log events go to
//! `<data_local_dir>/cityweather/cityweather.log`. Verbosity follows `RUST_LOG`.

use directories::ProjectDirs;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "cityweather=info";

/// Installs the global tracing subscriber.
///
/// Returns the log file path, or `None` if logging could not be set up.
/// Failing to log never stops the app.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cityweather")?;
    let (file, path) = open_log_file(dirs.data_local_dir()).ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

/// Creates the log directory if needed and opens the log file for appending
fn open_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join("cityweather.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}
