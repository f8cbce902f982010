//! Chart command: bar chart of the files with the most time.

use std::io::Write;

use anyhow::Result;

use ft_core::chart::BAR_WIDTH;
use ft_core::render_chart;

use super::open_controller;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, top: Option<usize>) -> Result<()> {
    let mut controller = open_controller(&mut *writer, config)?;
    let bars = controller.chart(top.unwrap_or(config.chart_top))?;
    write!(controller.host_mut().writer(), "{}", render_chart(&bars, BAR_WIDTH))?;
    Ok(())
}
