//! CLI subcommand implementations.

pub mod chart;
pub mod export;
pub mod panel;
pub mod reset;
pub mod status;
pub mod watch;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use ft_core::{Controller, PanelRow};
use ft_db::Database;

use crate::{Config, TerminalHost};

/// Opens the database, ensuring its parent directory exists.
pub fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// Exclusive claim on the database held by whoever is writing to it.
///
/// Released when dropped.
#[derive(Debug)]
pub struct DatabaseLock {
    _file: File,
}

/// Returns the path of the lock file that sits next to the database.
fn lock_path(database_path: &Path) -> PathBuf {
    let mut name = database_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Claims the database for writing.
///
/// Returns `None` if another process already holds the claim.
pub fn try_lock_database(config: &Config) -> Result<Option<DatabaseLock>> {
    let path = lock_path(&config.database_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .with_context(|| format!("failed to create lock file {}", path.display()))?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(Some(DatabaseLock { _file: file })),
        Err(err) if err.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
            tracing::debug!(path = %path.display(), "database lock is held elsewhere");
            Ok(None)
        }
        Err(err) => Err(err).context("failed to acquire lock"),
    }
}

/// Builds a controller over the configured database that prints to `writer`.
pub(crate) fn open_controller<W: Write>(
    writer: W,
    config: &Config,
) -> Result<Controller<Database, TerminalHost<W>>> {
    let db = open_database(config)?;
    Ok(Controller::new(
        db,
        TerminalHost::new(writer),
        config.break_policy(),
    ))
}

/// Finds the panel row for `path`.
pub(crate) fn find_row(rows: Vec<PanelRow>, path: &str) -> Option<PanelRow> {
    rows.into_iter()
        .find(|row| row.tracked_file().is_some_and(|file| file.path == path))
}
