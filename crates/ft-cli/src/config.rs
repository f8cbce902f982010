//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use ft_core::BreakPolicy;
use ft_core::chart::DEFAULT_TOP;
use ft_core::tracker::DEFAULT_BREAK_THRESHOLD_SECONDS;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Session seconds before a break reminder. Zero disables reminders.
    pub break_reminder_seconds: u64,

    /// Remind again at every multiple of `break_reminder_seconds`.
    pub repeat_break_reminder: bool,

    /// Number of files shown by `chart`.
    pub chart_top: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("ft.db"),
            break_reminder_seconds: DEFAULT_BREAK_THRESHOLD_SECONDS,
            repeat_break_reminder: false,
            chart_top: DEFAULT_TOP,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (FT_*)
        figment = figment.merge(Env::prefixed("FT_"));

        figment.extract()
    }

    /// Break reminder policy for the tracker.
    pub const fn break_policy(&self) -> BreakPolicy {
        BreakPolicy {
            threshold_seconds: self.break_reminder_seconds,
            repeat: self.repeat_break_reminder,
        }
    }
}

/// Returns the platform-specific config directory for ft.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ft"))
}

/// Returns the platform-specific data directory for ft.
///
/// On Linux: `~/.local/share/ft`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ft"))
}
