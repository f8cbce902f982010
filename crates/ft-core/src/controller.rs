//! Controller: the single owner of tracker state, store writes, and view order.

use std::fmt;
use std::path::PathBuf;

use crate::chart::{ChartBar, top_files};
use crate::error::CoreError;
use crate::export::{EXPORT_ALL_FILE_NAME, Report, export_file_name};
use crate::format::{display_name, format_duration};
use crate::store::{TimeStore, TrackedFile, snapshot};
use crate::tracker::{BreakPolicy, Effect, Message, Tracker};
use crate::view::{PanelRow, SortOrder, StatusView, build_panel};

/// User-visible informational messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A report was written. `name` is set for single-file exports.
    Exported { name: Option<String> },

    /// A file's time was reset. `name` is `None` for the current file.
    Reset { name: Option<String> },

    /// The session reached the break threshold.
    BreakReminder { elapsed_seconds: u64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exported { name: None } => write!(f, "Time data exported successfully."),
            Self::Exported { name: Some(name) } => write!(f, "Exported time for {name}"),
            Self::Reset { name: None } => write!(f, "Time reset for current file."),
            Self::Reset { name: Some(name) } => write!(f, "Reset time for {name}"),
            Self::BreakReminder { elapsed_seconds } => {
                match (elapsed_seconds / 60, elapsed_seconds % 60) {
                    (1, 0) => write!(f, "1 minute passed! Time for a break?"),
                    (minutes, 0) => write!(f, "{minutes} minutes passed! Time for a break?"),
                    _ => write!(
                        f,
                        "{} passed! Time for a break?",
                        format_duration(*elapsed_seconds)
                    ),
                }
            }
        }
    }
}

/// Rendering side of the editor integration.
pub trait Host {
    /// Shows an informational toast.
    fn notify(&mut self, notification: &Notification);

    /// The status line changed. `None` hides it.
    fn status_changed(&mut self, status: Option<&StatusView>);

    /// Pull-based views (panel, chart) are stale and may be recomputed.
    fn views_changed(&mut self) {}
}

/// Drives a [`Tracker`] against a [`TimeStore`] and a [`Host`].
///
/// Every store write goes through here, so callers on the host's event
/// thread never race with the tick.
pub struct Controller<S, H> {
    store: S,
    host: H,
    tracker: Tracker,
    order: SortOrder,
    ticking: bool,
    timer_generation: u64,
}

impl<S, H> Controller<S, H>
where
    S: TimeStore,
    H: Host,
{
    pub fn new(store: S, host: H, policy: BreakPolicy) -> Self {
        Self {
            store,
            host,
            tracker: Tracker::new(policy),
            order: SortOrder::default(),
            ticking: false,
            timer_generation: 0,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub const fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Whether the one-second timer should be running.
    pub const fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Incremented every time the timer is (re)started. Drivers compare it to
    /// detect that their interval must be reset.
    pub const fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    /// The editor's active file changed; `None` when no file is open.
    pub fn focus_changed(&mut self, path: Option<&str>) -> Result<(), CoreError> {
        let message = match path {
            Some(path) => Message::FocusChanged {
                path: Some(path.to_string()),
                stored_seconds: self.store.get(path).map_err(CoreError::store)?,
            },
            None => Message::FocusChanged {
                path: None,
                stored_seconds: 0,
            },
        };
        self.dispatch(message)
    }

    /// One second elapsed.
    pub fn tick(&mut self) -> Result<(), CoreError> {
        self.dispatch(Message::Tick)
    }

    /// Stops the timer. Totals are already persisted by every tick.
    pub fn shutdown(&mut self) {
        if self.ticking {
            tracing::debug!(path = ?self.tracker.active_path(), "cancelling timer on shutdown");
        }
        self.ticking = false;
    }

    /// Current status line, if a file is being tracked.
    pub fn status(&self) -> Option<StatusView> {
        self.tracker.session().map(StatusView::from_session)
    }

    /// Snapshot of every tracked file in store order.
    pub fn files(&self) -> Result<Vec<TrackedFile>, CoreError> {
        snapshot(&self.store).map_err(CoreError::store)
    }

    /// Builds the panel with the current sort order.
    pub fn show_panel(&self) -> Result<Vec<PanelRow>, CoreError> {
        Ok(build_panel(self.files()?, self.order))
    }

    /// Flips the sort order and returns the refreshed panel.
    pub fn toggle_sort(&mut self) -> Result<Vec<PanelRow>, CoreError> {
        self.order = self.order.toggle();
        tracing::debug!(order = ?self.order, "toggled sort order");
        self.host.views_changed();
        self.show_panel()
    }

    /// Resets the tracked file. Returns `false` when nothing is active.
    pub fn reset_current(&mut self) -> Result<bool, CoreError> {
        let Some(path) = self.tracker.active_path().map(str::to_string) else {
            return Ok(false);
        };
        self.reset_path(path)?;
        self.host.notify(&Notification::Reset { name: None });
        Ok(true)
    }

    /// Resets the file behind a panel row. The header row is ignored.
    pub fn reset_item(&mut self, row: &PanelRow) -> Result<bool, CoreError> {
        let Some(file) = row.tracked_file() else {
            return Ok(false);
        };
        self.reset_path(file.path.clone())?;
        self.host.notify(&Notification::Reset {
            name: Some(row.label()),
        });
        Ok(true)
    }

    fn reset_path(&mut self, path: String) -> Result<(), CoreError> {
        tracing::info!(path = %path, "resetting tracked time");
        self.dispatch(Message::Reset { path })
    }

    /// Exports every file. `pick` receives the default file name and returns
    /// the destination, or `None` if the user cancelled.
    pub fn export_all<F>(&mut self, pick: F) -> Result<Option<PathBuf>, CoreError>
    where
        F: FnOnce(&str) -> Option<PathBuf>,
    {
        let report = Report::all(&self.files()?);
        let Some(destination) = pick(EXPORT_ALL_FILE_NAME) else {
            tracing::debug!("export cancelled");
            return Ok(None);
        };
        report.write_to(&destination)?;
        self.host.notify(&Notification::Exported { name: None });
        Ok(Some(destination))
    }

    /// Exports the file behind a panel row. The header row is ignored.
    pub fn export_item<F>(&mut self, row: &PanelRow, pick: F) -> Result<Option<PathBuf>, CoreError>
    where
        F: FnOnce(&str) -> Option<PathBuf>,
    {
        let Some(file) = row.tracked_file() else {
            return Ok(None);
        };
        let total_seconds = self.store.get(&file.path).map_err(CoreError::store)?;
        let report = Report::single(&TrackedFile::new(file.path.clone(), total_seconds));

        let Some(destination) = pick(&export_file_name(&file.path)) else {
            tracing::debug!(path = %file.path, "export cancelled");
            return Ok(None);
        };
        report.write_to(&destination)?;
        self.host.notify(&Notification::Exported {
            name: Some(display_name(&file.path).to_string()),
        });
        Ok(Some(destination))
    }

    /// The `n` files with the largest totals, recomputed on every call.
    pub fn chart(&self, n: usize) -> Result<Vec<ChartBar>, CoreError> {
        Ok(top_files(&self.files()?, n))
    }

    fn dispatch(&mut self, message: Message) -> Result<(), CoreError> {
        for effect in self.tracker.handle(message) {
            self.apply(effect)?;
        }
        Ok(())
    }

    fn apply(&mut self, effect: Effect) -> Result<(), CoreError> {
        match effect {
            Effect::StartTimer => {
                self.ticking = true;
                self.timer_generation += 1;
                tracing::debug!(path = ?self.tracker.active_path(), "timer started");
            }
            Effect::CancelTimer => {
                self.ticking = false;
                tracing::debug!("timer cancelled");
            }
            Effect::Persist {
                path,
                total_seconds,
            } => {
                self.store
                    .set(&path, total_seconds)
                    .map_err(CoreError::store)?;
            }
            Effect::RefreshViews => {
                let status = self.status();
                self.host.status_changed(status.as_ref());
                self.host.views_changed();
            }
            Effect::BreakReminder {
                path,
                elapsed_seconds,
            } => {
                tracing::info!(path = %path, elapsed_seconds, "break reminder");
                self.host.notify(&Notification::BreakReminder { elapsed_seconds });
            }
        }
        Ok(())
    }
}
