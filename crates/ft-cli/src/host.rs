//! Terminal rendering of notifications and the status line.

use std::io::Write;

use ft_core::{Host, Notification, StatusView};

/// Host that prints to a writer instead of editor widgets.
pub struct TerminalHost<W> {
    out: W,
    show_status: bool,
}

impl<W: Write> TerminalHost<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            show_status: false,
        }
    }

    /// Print the status line whenever it changes.
    #[must_use]
    pub const fn with_status(mut self, show_status: bool) -> Self {
        self.show_status = show_status;
        self
    }

    pub const fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<W: Write> Host for TerminalHost<W> {
    fn notify(&mut self, notification: &Notification) {
        tracing::debug!(%notification, "notification");
        self.emit(&notification.to_string());
    }

    fn status_changed(&mut self, status: Option<&StatusView>) {
        if !self.show_status {
            return;
        }
        match status {
            Some(status) => {
                let line = format!("{}  {}", status.text(), status.file_name);
                self.emit(&line);
            }
            None => self.emit("⏱ paused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ft_core::tracker::Session;

    fn output(host: TerminalHost<Vec<u8>>) -> String {
        String::from_utf8(host.out).unwrap()
    }

    #[test]
    fn notifications_are_printed() {
        let mut host = TerminalHost::new(Vec::new());
        host.notify(&Notification::Reset {
            name: Some("main.rs".to_string()),
        });
        host.notify(&Notification::BreakReminder { elapsed_seconds: 1500 });
        assert_eq!(
            output(host),
            "Reset time for main.rs\n25 minutes passed! Time for a break?\n"
        );
    }

    #[test]
    fn status_is_hidden_unless_enabled() {
        let session = Session {
            path: "/src/lib.rs".to_string(),
            baseline_seconds: 0,
            elapsed_seconds: 61,
            reminded: false,
        };
        let status = StatusView::from_session(&session);

        let mut quiet = TerminalHost::new(Vec::new());
        quiet.status_changed(Some(&status));
        assert_eq!(output(quiet), "");

        let mut loud = TerminalHost::new(Vec::new()).with_status(true);
        loud.status_changed(Some(&status));
        loud.status_changed(None);
        assert_eq!(output(loud), "⏱ 01:01  lib.rs\n⏱ paused\n");
    }
}
