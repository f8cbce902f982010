//! End-to-end tests driving the `ft` binary.
//!
//! Tests the full pipeline: watch (focus + ticks) → panel → export → reset.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

fn ft_binary() -> String {
    env!("CARGO_BIN_EXE_ft").to_string()
}

/// Writes a config file pointing at a database inside `temp`.
fn write_config(temp: &Path) -> PathBuf {
    let db_path = temp.join("ft.db");
    let config_path = temp.join("config.toml");
    std::fs::write(
        &config_path,
        format!("database_path = \"{}\"\n", db_path.display()),
    )
    .unwrap();
    config_path
}

/// Builds an `ft` invocation isolated from the user's home and `FT_*` settings.
fn ft_command(config: &Path) -> Command {
    let home = config.parent().unwrap();
    let mut command = Command::new(ft_binary());
    command
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("FT_DATABASE_PATH")
        .env_remove("FT_BREAK_REMINDER_SECONDS")
        .env_remove("FT_REPEAT_BREAK_REMINDER")
        .env_remove("FT_CHART_TOP")
        .arg("--config")
        .arg(config);
    command
}

fn ft_unchecked(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = ft_command(config)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn ft");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for ft")
}

fn ft(config: &Path, args: &[&str], stdin: &str) -> Output {
    let output = ft_unchecked(config, args, stdin);
    assert!(
        output.status.success(),
        "ft {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Runs `ft watch`, focuses `file`, and quits after `seconds`.
fn watch_for(config: &Path, file: &str, seconds: f64) {
    let mut child = ft_command(config)
        .arg("watch")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn ft watch");

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "focus {file}").unwrap();
    stdin.flush().unwrap();
    thread::sleep(Duration::from_secs_f64(seconds));
    writeln!(stdin, "quit").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "ft watch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn exported_seconds(config: &Path, temp: &Path, file: &str) -> u64 {
    let destination = temp.join("check.json");
    ft(
        config,
        &["export", "--output", destination.to_str().unwrap()],
        "",
    );
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&destination).unwrap()).unwrap();
    value[file].as_u64().unwrap_or(0)
}

#[test]
fn test_watch_accumulates_time_for_focused_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    watch_for(&config, "/project/src/main.rs", 2.5);

    let seconds = exported_seconds(&config, temp.path(), "/project/src/main.rs");
    assert!(
        (1..=3).contains(&seconds),
        "expected about two seconds, got {seconds}"
    );

    let panel = stdout(&ft(&config, &["panel"], ""));
    assert!(panel.starts_with("Total ↓: "), "{panel}");
    assert!(panel.contains("main.rs"), "{panel}");
    assert!(panel.contains("/project/src/main.rs"), "{panel}");
}

#[test]
fn test_totals_survive_restart() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    watch_for(&config, "/project/lib.rs", 2.0);
    let first = exported_seconds(&config, temp.path(), "/project/lib.rs");
    watch_for(&config, "/project/lib.rs", 2.0);
    let second = exported_seconds(&config, temp.path(), "/project/lib.rs");

    assert!(first >= 1, "first run tracked {first}");
    assert!(second > first, "second run should add to {first}, got {second}");
}

#[test]
fn test_reset_zeroes_file_but_keeps_it_listed() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    watch_for(&config, "/project/a.rs", 2.0);

    let output = ft(&config, &["reset", "/project/a.rs"], "");
    assert_eq!(stdout(&output), "Reset time for a.rs\n");

    assert_eq!(exported_seconds(&config, temp.path(), "/project/a.rs"), 0);
    let panel = stdout(&ft(&config, &["panel"], ""));
    assert!(panel.contains("a.rs  00:00  /project/a.rs"), "{panel}");
}

#[test]
fn test_export_prompt_cancelled_on_end_of_input() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    watch_for(&config, "/project/a.rs", 2.0);

    let output = ft(&config, &["export"], "");
    assert_eq!(stdout(&output), "");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Save as [time-tracker-export.json]"));
    assert!(!temp.path().join("time-tracker-export.json").exists());
}

#[test]
fn test_export_single_file_to_output() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    watch_for(&config, "/project/a.rs", 2.0);
    watch_for(&config, "/project/b.rs", 2.0);

    let destination = temp.path().join("b.json");
    let output = ft(
        &config,
        &[
            "export",
            "--file",
            "/project/b.rs",
            "--output",
            destination.to_str().unwrap(),
        ],
        "",
    );
    assert_eq!(stdout(&output), "Exported time for b.rs\n");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&destination).unwrap()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["/project/b.rs"].as_u64().unwrap() >= 1);
}

#[test]
fn test_chart_and_status_on_empty_database() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    assert_eq!(stdout(&ft(&config, &["chart"], "")), "No tracked files.\n");
    let status = stdout(&ft(&config, &["status"], ""));
    assert!(status.contains("No time tracked."), "{status}");
}

#[test]
fn test_watch_ignores_unknown_input() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let output = ft(&config, &["watch"], "wiggle\npanel\nstatus\n");
    assert_eq!(stdout(&output), "Total ↓: 00:00\nNot tracking.\n");
}

#[test]
fn test_reset_is_refused_while_watch_is_running() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let mut watch = ft_command(&config)
        .arg("watch")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn ft watch");
    let mut stdin = watch.stdin.take().unwrap();
    writeln!(stdin, "focus /p/a.rs").unwrap();
    stdin.flush().unwrap();
    thread::sleep(Duration::from_secs_f64(3.5));

    let refused = ft_unchecked(&config, &["reset", "/p/a.rs"], "");
    assert!(!refused.status.success());
    assert_eq!(stdout(&refused), "");
    assert!(
        String::from_utf8_lossy(&refused.stderr).contains("send `reset /p/a.rs`"),
        "{}",
        String::from_utf8_lossy(&refused.stderr)
    );

    let second_watch = ft_unchecked(&config, &["watch"], "");
    assert!(!second_watch.status.success());

    // The running session owns the reset.
    writeln!(stdin, "reset /p/a.rs").unwrap();
    writeln!(stdin, "quit").unwrap();
    drop(stdin);
    let output = watch.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Reset time for a.rs\n");

    let seconds = exported_seconds(&config, temp.path(), "/p/a.rs");
    assert!(seconds <= 1, "reset was overwritten: {seconds}");
}

#[test]
fn test_status_uses_configured_database_only() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let status = stdout(&ft(&config, &["status"], ""));
    let expected = format!("Database: {}", temp.path().join("ft.db").display());
    assert!(status.contains(&expected), "{status}");
}
