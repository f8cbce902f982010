//! Export command: write tracked time as JSON.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use super::{find_row, open_controller};
use crate::Config;

/// Asks for a destination on the terminal.
///
/// An empty answer accepts `default_name`; end of input cancels.
pub fn prompt_destination<R, W>(input: &mut R, prompt: &mut W, default_name: &str) -> Option<PathBuf>
where
    R: BufRead,
    W: Write,
{
    if write!(prompt, "Save as [{default_name}]: ")
        .and_then(|()| prompt.flush())
        .is_err()
    {
        return None;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => None,
        Ok(_) => {
            let answer = answer.trim();
            if answer.is_empty() {
                Some(PathBuf::from(default_name))
            } else {
                Some(PathBuf::from(answer))
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read destination");
            None
        }
    }
}

/// Runs the export command.
///
/// Without `output`, the destination is read through `prompt`.
pub fn run<W, P>(
    writer: &mut W,
    config: &Config,
    file: Option<&str>,
    output: Option<PathBuf>,
    prompt: P,
) -> Result<()>
where
    W: Write,
    P: FnOnce(&str) -> Option<PathBuf>,
{
    let mut controller = open_controller(&mut *writer, config)?;
    let pick = |default_name: &str| output.or_else(|| prompt(default_name));

    let written = match file {
        None => controller.export_all(pick)?,
        Some(path) => {
            let Some(row) = find_row(controller.show_panel()?, path) else {
                writeln!(controller.host_mut().writer(), "No tracked time for {path}.")?;
                return Ok(());
            };
            controller.export_item(&row, pick)?
        }
    };

    if let Some(destination) = written {
        tracing::info!(path = %destination.display(), "exported tracked time");
    }
    Ok(())
}
