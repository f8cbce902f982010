//! Core domain logic for the per-file time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Time store: cumulative tracked seconds keyed by file path
//! - Tracking: the active-file state machine driven by focus changes and ticks
//! - Views: status line, sortable panel, top-files chart, and JSON reports
//!
//! Nothing here talks to an editor or a clock directly. A host adapter feeds
//! focus changes and timer ticks into a [`Controller`] and renders what it
//! gets back.

pub mod chart;
mod controller;
mod error;
pub mod export;
mod format;
pub mod store;
pub mod tracker;
pub mod view;

pub use chart::{ChartBar, render_chart, top_files};
pub use controller::{Controller, Host, Notification};
pub use error::CoreError;
pub use export::Report;
pub use format::{display_name, format_duration};
pub use store::{MemoryStore, TimeStore, TrackedFile, snapshot};
pub use tracker::{BreakPolicy, Effect, Message, Session, Tracker, TrackerState};
pub use view::{PanelRow, SortOrder, StatusView, build_panel, render_panel};
