//! Derived views over the time store: status line and sortable panel.

use std::fmt::Write;

use crate::format::{display_name, format_duration};
use crate::store::TrackedFile;
use crate::tracker::Session;

/// Status line for the session in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub file_name: String,
    pub session_seconds: u64,
    pub total_seconds: u64,
}

impl StatusView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            file_name: display_name(&session.path).to_string(),
            session_seconds: session.elapsed_seconds,
            total_seconds: session.total_seconds(),
        }
    }

    /// Primary text: session time only.
    pub fn text(&self) -> String {
        format!("⏱ {}", format_duration(self.session_seconds))
    }

    /// Secondary detail: file name, session time, and cumulative total.
    pub fn detail(&self) -> String {
        format!(
            "File: {}\nSession: {}\nTotal: {}",
            self.file_name,
            format_duration(self.session_seconds),
            format_duration(self.total_seconds)
        )
    }
}

/// Panel sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Descending => "↓",
            Self::Ascending => "↑",
        }
    }

    /// Sorts by total seconds. Ties keep their enumeration order.
    pub fn sort(self, files: &mut [TrackedFile]) {
        match self {
            Self::Descending => files.sort_by(|a, b| b.total_seconds.cmp(&a.total_seconds)),
            Self::Ascending => files.sort_by(|a, b| a.total_seconds.cmp(&b.total_seconds)),
        }
    }
}

/// One row of the panel listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    /// Synthetic header with the grand total and the current sort direction.
    Total { total_seconds: u64, order: SortOrder },

    /// A tracked file.
    File(TrackedFile),
}

impl PanelRow {
    pub fn label(&self) -> String {
        match self {
            Self::Total {
                total_seconds,
                order,
            } => format!("Total {}: {}", order.arrow(), format_duration(*total_seconds)),
            Self::File(file) => display_name(&file.path).to_string(),
        }
    }

    /// Formatted total shown beside a file's name.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Total { .. } => None,
            Self::File(file) => Some(format_duration(file.total_seconds)),
        }
    }

    /// The tracked file behind this row, or `None` for the header.
    pub const fn tracked_file(&self) -> Option<&TrackedFile> {
        match self {
            Self::Total { .. } => None,
            Self::File(file) => Some(file),
        }
    }
}

/// Builds the panel: the total header first, then one sorted row per file.
pub fn build_panel(mut files: Vec<TrackedFile>, order: SortOrder) -> Vec<PanelRow> {
    let total_seconds = files
        .iter()
        .fold(0_u64, |sum, file| sum.saturating_add(file.total_seconds));
    order.sort(&mut files);

    let mut rows = Vec::with_capacity(files.len() + 1);
    rows.push(PanelRow::Total {
        total_seconds,
        order,
    });
    rows.extend(files.into_iter().map(PanelRow::File));
    rows
}

/// Renders panel rows as aligned text, one row per line.
pub fn render_panel(rows: &[PanelRow]) -> String {
    let name_width = rows
        .iter()
        .filter(|row| row.tracked_file().is_some())
        .map(|row| row.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for row in rows {
        match row {
            PanelRow::Total { .. } => {
                let _ = writeln!(output, "{}", row.label());
            }
            PanelRow::File(file) => {
                let _ = writeln!(
                    output,
                    "  {:<name_width$}  {}  {}",
                    row.label(),
                    row.description().unwrap_or_default(),
                    file.path
                );
            }
        }
    }
    output
}
