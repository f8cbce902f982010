//! Reset command: zero a file's tracked time.

use std::io::Write;

use anyhow::{Result, bail};

use super::{find_row, open_controller, try_lock_database};
use crate::Config;

/// Resets `path` to zero.
///
/// Refuses while a watch session owns the database, since its next tick
/// would write the old total back.
pub fn run<W: Write>(writer: &mut W, config: &Config, path: &str) -> Result<()> {
    let Some(_lock) = try_lock_database(config)? else {
        bail!("a watch session is tracking this database; send `reset {path}` to it instead");
    };
    let mut controller = open_controller(&mut *writer, config)?;
    let Some(row) = find_row(controller.show_panel()?, path) else {
        writeln!(controller.host_mut().writer(), "No tracked time for {path}.")?;
        return Ok(());
    };
    controller.reset_item(&row)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ft_core::TimeStore;
    use ft_db::Database;

    #[test]
    fn reset_zeroes_total_and_keeps_entry() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("ft.db");
        Database::open(&db_path)
            .unwrap()
            .set("/src/main.rs", 1234)
            .unwrap();
        let config = Config {
            database_path: db_path.clone(),
            ..Config::default()
        };

        let mut output = Vec::new();
        run(&mut output, &config, "/src/main.rs").unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "Reset time for main.rs\n");
        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.get("/src/main.rs").unwrap(), 0);
        assert_eq!(db.keys().unwrap(), vec!["/src/main.rs"]);
    }

    #[test]
    fn reset_refuses_while_database_is_locked() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("ft.db");
        Database::open(&db_path)
            .unwrap()
            .set("/src/main.rs", 42)
            .unwrap();
        let config = Config {
            database_path: db_path.clone(),
            ..Config::default()
        };
        let _watch = try_lock_database(&config).unwrap().unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &config, "/src/main.rs").unwrap_err();

        assert!(err.to_string().contains("send `reset /src/main.rs`"), "{err}");
        assert!(output.is_empty());
        assert_eq!(Database::open(&db_path).unwrap().get("/src/main.rs").unwrap(), 42);
    }

    #[test]
    fn reset_unknown_path_reports_and_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("ft.db");
        let config = Config {
            database_path: db_path.clone(),
            ..Config::default()
        };

        let mut output = Vec::new();
        run(&mut output, &config, "/nope.rs").unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No tracked time for /nope.rs.\n"
        );
        assert!(Database::open(&db_path).unwrap().keys().unwrap().is_empty());
    }
}
