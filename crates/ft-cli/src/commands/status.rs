//! Status command for showing where time is stored and how much there is.

use std::io::Write;

use anyhow::Result;

use ft_core::{display_name, format_duration};

use super::open_database;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let files = db.list_files()?;

    writeln!(writer, "File time tracker status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    // Equal timestamps resolve to the later row.
    let Some(last) = files.iter().max_by(|a, b| a.updated_at.cmp(&b.updated_at)) else {
        writeln!(writer, "No time tracked.")?;
        return Ok(());
    };

    let total = files
        .iter()
        .fold(0_u64, |sum, file| sum.saturating_add(file.total_seconds));
    writeln!(writer, "Tracked files: {}", files.len())?;
    writeln!(writer, "Total time: {}", format_duration(total))?;
    writeln!(
        writer,
        "Last tracked: {} at {}",
        display_name(&last.path),
        last.updated_at
    )?;

    Ok(())
}
