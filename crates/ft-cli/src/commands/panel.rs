//! Panel command: tracked files sorted by total time.

use std::io::Write;

use anyhow::Result;

use ft_core::render_panel;

use super::open_controller;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, ascending: bool) -> Result<()> {
    let mut controller = open_controller(&mut *writer, config)?;
    let rows = if ascending {
        controller.toggle_sort()?
    } else {
        controller.show_panel()?
    };
    write!(controller.host_mut().writer(), "{}", render_panel(&rows))?;
    Ok(())
}
