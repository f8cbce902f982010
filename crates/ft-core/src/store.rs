//! Time store abstraction: cumulative tracked seconds keyed by file path.

use std::collections::HashMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// A file and its cumulative tracked time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    /// Absolute path identifying the file.
    pub path: String,

    /// Total seconds tracked across all sessions.
    pub total_seconds: u64,
}

impl TrackedFile {
    pub fn new(path: impl Into<String>, total_seconds: u64) -> Self {
        Self {
            path: path.into(),
            total_seconds,
        }
    }
}

/// Persistent mapping from file path to cumulative seconds.
///
/// The tracker is the only writer. Readers take a [`snapshot`] at call time.
pub trait TimeStore {
    /// Backend failure type. Stores with no failure path use [`Infallible`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the stored total for `path`, or 0 if it was never tracked.
    fn get(&self, path: &str) -> Result<u64, Self::Error>;

    /// Overwrites the stored total for `path`.
    fn set(&mut self, path: &str, total_seconds: u64) -> Result<(), Self::Error>;

    /// Lists every known path. Order is implementation-defined but stable
    /// between calls that do not add new paths.
    fn keys(&self) -> Result<Vec<String>, Self::Error>;
}

/// Reads every entry of `store` in enumeration order.
pub fn snapshot<S>(store: &S) -> Result<Vec<TrackedFile>, S::Error>
where
    S: TimeStore + ?Sized,
{
    store
        .keys()?
        .into_iter()
        .map(|path| {
            let total_seconds = store.get(&path)?;
            Ok(TrackedFile {
                path,
                total_seconds,
            })
        })
        .collect()
}

/// In-memory store that enumerates keys in first-write order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    order: Vec<String>,
    totals: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`, in the given order.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, u64)>,
        P: Into<String>,
    {
        let mut store = Self::new();
        for (path, seconds) in entries {
            store.insert(path.into(), seconds);
        }
        store
    }

    fn insert(&mut self, path: String, seconds: u64) {
        if !self.totals.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.totals.insert(path, seconds);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TimeStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, path: &str) -> Result<u64, Self::Error> {
        Ok(self.totals.get(path).copied().unwrap_or(0))
    }

    fn set(&mut self, path: &str, total_seconds: u64) -> Result<(), Self::Error> {
        self.insert(path.to_string(), total_seconds);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.order.clone())
    }
}
