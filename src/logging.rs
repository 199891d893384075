//! Opt-in file logging.
//!
//! The terminal belongs to the TUI, so log lines go to `memegrid.log` in the
//! cache directory instead of stderr. Nothing is initialized unless
//! `MEMEGRID_LOG` carries a filter (e.g. `MEMEGRID_LOG=debug`).

use std::fs;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

const FILTER_ENV: &str = "MEMEGRID_LOG";
const LOG_FILE: &str = "memegrid.log";

/// Install the tracing subscriber when `MEMEGRID_LOG` is set.
pub fn initialize() -> Result<()> {
    if std::env::var_os(FILTER_ENV).is_none() {
        return Ok(());
    }

    let dir = app_dirs::get_cache_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(FILTER_ENV))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::debug!("logging initialized");
    Ok(())
}
