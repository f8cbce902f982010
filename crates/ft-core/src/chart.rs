//! Top-files bar chart.

use std::fmt::Write;

use crate::format::{display_name, format_duration};
use crate::store::TrackedFile;
use crate::view::SortOrder;

/// Number of files shown by default.
pub const DEFAULT_TOP: usize = 5;

/// Bar width in blocks.
pub const BAR_WIDTH: usize = 20;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub name: String,
    pub path: String,
    pub total_seconds: u64,
}

/// Selects the `n` files with the largest totals, descending.
///
/// Ties keep their enumeration order.
pub fn top_files(files: &[TrackedFile], n: usize) -> Vec<ChartBar> {
    let mut sorted = files.to_vec();
    SortOrder::Descending.sort(&mut sorted);
    sorted
        .into_iter()
        .take(n)
        .map(|file| ChartBar {
            name: display_name(&file.path).to_string(),
            total_seconds: file.total_seconds,
            path: file.path,
        })
        .collect()
}

/// Number of filled blocks for `value` on a `width`-block bar scaled to `max`.
/// Non-zero values always get at least one block.
fn filled_blocks(value: u64, max: u64, width: usize) -> usize {
    if value == 0 || max == 0 || width == 0 {
        return 0;
    }
    let width = width as u128;
    let (value, max) = (u128::from(value), u128::from(max));
    let filled = (value * width + max / 2) / max;
    usize::try_from(filled.clamp(1, width)).unwrap_or(0)
}

/// Renders bars as text, one line each: name, bar, total.
pub fn render_chart(bars: &[ChartBar], width: usize) -> String {
    if bars.is_empty() {
        return "No tracked files.\n".to_string();
    }

    let max = bars.iter().map(|bar| bar.total_seconds).max().unwrap_or(0);
    let name_width = bars
        .iter()
        .map(|bar| bar.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for bar in bars {
        let filled = filled_blocks(bar.total_seconds, max, width);
        let _ = writeln!(
            output,
            "{:<name_width$}  {}{}  {}",
            bar.name,
            "█".repeat(filled),
            "░".repeat(width - filled),
            format_duration(bar.total_seconds)
        );
    }
    output
}
