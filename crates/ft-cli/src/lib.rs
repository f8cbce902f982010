//! Per-file time tracker CLI library.
//!
//! This crate is the host adapter: it turns terminal input into tracker
//! messages and renders the core views as text.

mod cli;
pub mod commands;
mod config;
pub mod host;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use host::TerminalHost;
