//! Watch command: the event loop that drives tracking.
//!
//! Focus changes and commands arrive as lines on stdin. A one-second interval
//! delivers ticks while a file is being tracked. Everything runs on a single
//! current-thread runtime, so ticks and commands never interleave.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use ft_core::chart::BAR_WIDTH;
use ft_core::export::export_file_name;
use ft_core::{Controller, Host, TimeStore, render_chart, render_panel};

use super::{find_row, open_database, try_lock_database};
use crate::{Config, TerminalHost};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One line of watch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Focus(String),
    Blur,
    Panel,
    Sort,
    ResetCurrent,
    Reset(String),
    Export(Option<PathBuf>),
    ExportFile(String),
    Chart,
    Status,
    Quit,
}

/// Error for input lines that are not a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInput(String);

impl fmt::Display for UnknownInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown input: {}", self.0)
    }
}

impl std::error::Error for UnknownInput {}

impl FromStr for Input {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        match (command, rest) {
            ("focus", path) if !path.is_empty() => Ok(Self::Focus(path.to_string())),
            ("blur", "") => Ok(Self::Blur),
            ("panel", "") => Ok(Self::Panel),
            ("sort", "") => Ok(Self::Sort),
            ("reset", "") => Ok(Self::ResetCurrent),
            ("reset", path) => Ok(Self::Reset(path.to_string())),
            ("export", "") => Ok(Self::Export(None)),
            ("export", destination) => Ok(Self::Export(Some(PathBuf::from(destination)))),
            ("export-file", path) if !path.is_empty() => Ok(Self::ExportFile(path.to_string())),
            ("chart", "") => Ok(Self::Chart),
            ("status", "") => Ok(Self::Status),
            ("quit" | "exit", "") => Ok(Self::Quit),
            _ => Err(UnknownInput(line.to_string())),
        }
    }
}

/// Runs the watch loop on stdin until end of input, `quit`, or Ctrl-C.
///
/// Holds the database lock for the whole session, so only one watch can
/// write a given database.
pub fn run(config: &Config, show_status: bool) -> Result<()> {
    let Some(_lock) = try_lock_database(config)? else {
        bail!(
            "another watch session is already tracking {}",
            config.database_path.display()
        );
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let result = runtime.block_on(async {
        let host = TerminalHost::new(std::io::stdout()).with_status(show_status);
        let mut controller = Controller::new(open_database(config)?, host, config.break_policy());

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_input(BufReader::new(tokio::io::stdin()), tx));

        tracing::info!(database = %config.database_path.display(), "watching for focus changes");
        drive(
            &mut controller,
            rx,
            &mut std::io::stdout(),
            config.chart_top,
            shutdown_signal(),
        )
        .await
    });

    // The stdin reader blocks in the background; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Parses lines from `reader` and forwards them until end of input.
pub async fn read_input<R>(reader: R, tx: mpsc::UnboundedSender<Input>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse() {
                    Ok(input) => {
                        if tx.send(input).is_err() {
                            break;
                        }
                    }
                    Err(err) => tracing::warn!(%err, "ignoring input"),
                }
            }
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read input");
                break;
            }
        }
    }
}

fn tick_interval() -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Drives `controller` from `input` and a one-second interval.
///
/// Command output (panel, chart, status) goes to `out`. Returns when input
/// ends, `quit` arrives, or `shutdown` resolves.
pub async fn drive<S, H, W, F>(
    controller: &mut Controller<S, H>,
    mut input: mpsc::UnboundedReceiver<Input>,
    out: &mut W,
    chart_top: usize,
    shutdown: F,
) -> Result<()>
where
    S: TimeStore,
    H: Host,
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut interval = tick_interval();
    let mut generation = controller.timer_generation();

    loop {
        tokio::select! {
            () = &mut shutdown => {
                tracing::debug!("shutdown requested");
                break;
            }
            _ = interval.tick(), if controller.is_ticking() => {
                controller.tick()?;
            }
            received = input.recv() => {
                let Some(received) = received else {
                    tracing::debug!("input closed");
                    break;
                };
                if received == Input::Quit {
                    break;
                }
                if let Err(err) = handle(controller, received, out, chart_top) {
                    tracing::error!(error = %err, "command failed");
                    writeln!(out, "error: {err}")?;
                }
            }
        }

        if controller.timer_generation() != generation {
            generation = controller.timer_generation();
            interval = tick_interval();
        }
    }

    controller.shutdown();
    Ok(())
}

fn handle<S, H, W>(
    controller: &mut Controller<S, H>,
    input: Input,
    out: &mut W,
    chart_top: usize,
) -> Result<()>
where
    S: TimeStore,
    H: Host,
    W: Write,
{
    match input {
        Input::Focus(path) => controller.focus_changed(Some(&path))?,
        Input::Blur => controller.focus_changed(None)?,
        Input::Panel => write!(out, "{}", render_panel(&controller.show_panel()?))?,
        Input::Sort => write!(out, "{}", render_panel(&controller.toggle_sort()?))?,
        Input::ResetCurrent => {
            controller.reset_current()?;
        }
        Input::Reset(path) => {
            if let Some(row) = find_row(controller.show_panel()?, &path) {
                controller.reset_item(&row)?;
            }
        }
        Input::Export(destination) => {
            controller.export_all(|default_name| {
                Some(destination.unwrap_or_else(|| PathBuf::from(default_name)))
            })?;
        }
        Input::ExportFile(path) => {
            if let Some(row) = find_row(controller.show_panel()?, &path) {
                controller.export_item(&row, |_| Some(PathBuf::from(export_file_name(&path))))?;
            }
        }
        Input::Chart => write!(out, "{}", render_chart(&controller.chart(chart_top)?, BAR_WIDTH))?,
        Input::Status => match controller.status() {
            Some(status) => writeln!(out, "{}\n{}", status.text(), status.detail())?,
            None => writeln!(out, "Not tracking.")?,
        },
        Input::Quit => {}
    }
    Ok(())
}
