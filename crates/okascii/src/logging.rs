//! File logging. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter, e.g. `OKASCII_LOG=debug`.
pub const LOG_ENV: &str = "OKASCII_LOG";

/// Log to `okascii.log` in the platform data directory.
///
/// `OKASCII_LOG` takes precedence over `default_level`. Returns the log path,
/// or `None` when the platform has no data directory and logging is off.
pub fn init_tracing(default_level: &str) -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "okascii") else {
        return Ok(None);
    };
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join("okascii.log");
    let file = File::create(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(Some(path))
}
