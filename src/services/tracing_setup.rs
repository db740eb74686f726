//! Global tracing subscriber for the demo binary
//!
//! Logs go to a file because the terminal is owned by the UI. The level is
//! taken from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file used when none is given on the command line
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("menubar-{}.log", std::process::id()))
}

/// Install the global subscriber writing to `log_file`.
///
/// A subscriber that is already installed is left in place.
pub fn init_global(log_file: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Logging to {}", log_file.display());
    }
    Ok(())
}
