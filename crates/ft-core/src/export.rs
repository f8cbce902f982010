//! JSON reports of tracked time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::CoreError;
use crate::format::display_name;
use crate::store::TrackedFile;

/// Default file name offered when exporting every file.
pub const EXPORT_ALL_FILE_NAME: &str = "time-tracker-export.json";

/// Default file name offered when exporting a single file.
pub fn export_file_name(path: &str) -> String {
    format!("{}-time.json", display_name(path))
}

/// A report mapping file paths to cumulative seconds.
///
/// Serializes as a flat JSON object: `{ "<path>": <seconds>, ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report(BTreeMap<String, u64>);

impl Report {
    /// Report covering every tracked file.
    pub fn all(files: &[TrackedFile]) -> Self {
        Self(
            files
                .iter()
                .map(|file| (file.path.clone(), file.total_seconds))
                .collect(),
        )
    }

    /// Report with a single entry.
    pub fn single(file: &TrackedFile) -> Self {
        Self(BTreeMap::from([(file.path.clone(), file.total_seconds)]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the report as 2-space indented JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as UTF-8 JSON to `destination`.
    pub fn write_to(&self, destination: &Path) -> Result<(), CoreError> {
        let content = self.to_json()?;
        fs::write(destination, content).map_err(|source| CoreError::Write {
            path: destination.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %destination.display(), entries = self.len(), "wrote report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn report_all_renders_indented_object() {
        let report = Report::all(&[
            TrackedFile::new("/work/b.rs", 30),
            TrackedFile::new("/work/a.rs", 1500),
        ]);

        assert_snapshot!(report.to_json().unwrap(), @r#"
        {
          "/work/a.rs": 1500,
          "/work/b.rs": 30
        }
        "#);
    }

    #[test]
    fn report_single_has_one_key() {
        let report = Report::single(&TrackedFile::new("/work/a.rs", 61));
        assert_eq!(report.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "/work/a.rs": 61 }));
    }

    #[test]
    fn empty_report_is_empty_object() {
        let report = Report::all(&[]);
        assert!(report.is_empty());
        assert_eq!(report.to_json().unwrap(), "{}");
    }

    #[test]
    fn write_to_creates_file() {
        let temp = tempfile::tempdir().unwrap();
        let destination = temp.path().join("out.json");
        let report = Report::all(&[TrackedFile::new("/x.rs", 9)]);

        report.write_to(&destination).unwrap();

        let written = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(written, "{\n  \"/x.rs\": 9\n}");
    }

    #[test]
    fn write_to_missing_directory_names_path() {
        let temp = tempfile::tempdir().unwrap();
        let destination = temp.path().join("missing").join("out.json");
        let err = Report::default().write_to(&destination).unwrap_err();
        assert!(err.to_string().contains("out.json"), "{err}");
    }

    #[test]
    fn default_file_names() {
        assert_eq!(EXPORT_ALL_FILE_NAME, "time-tracker-export.json");
        assert_eq!(export_file_name("/src/main.rs"), "main.rs-time.json");
    }
}
