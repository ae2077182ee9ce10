//! Plain-text persistence for catalog, ledger and settings files
//!
//! Each logical collection lives in its own pretty-printed JSON file. Reads
//! distinguish a missing file (no prior data) from a broken one; writes are a
//! single create/write/close with no locking.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result of reading a data file
#[derive(Debug)]
pub enum Loaded<T> {
    /// File existed and parsed
    Found(T),
    /// File does not exist yet
    Missing,
}

/// Outcome reported by `load` operations on stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Data file read; carries the number of records now held
    Loaded(usize),
    /// No data file; in-memory state left as it was
    NotFound,
}

/// Errors reported by the catalog store and quotation ledger
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("failed to access {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("index {index} is out of range ({len} item(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no {kind} entry with type '{type_name}' and model '{model}'")]
    EntryNotFound {
        kind: String,
        type_name: String,
        model: String,
    },

    #[error("no valid rows to import")]
    NoValidRows,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid value for setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: String, value: f64 },
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &Path, err: impl std::fmt::Display) -> Self {
        StoreError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Reject NaN and infinities; JSON stores them as `null`, which no longer
/// reads back as a number
pub fn ensure_finite(field: &str, value: f64) -> Result<(), StoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Read and deserialize a JSON data file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    serde_json::from_str(&content)
        .map(Loaded::Found)
        .map_err(|e| StoreError::parse(path, e))
}

/// Serialize a value to a JSON data file, creating the parent directory if needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }

    let mut json = serde_json::to_string_pretty(value).map_err(|e| StoreError::parse(path, e))?;
    json.push('\n');
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("cost_price", 12.5).is_ok());
        assert!(ensure_finite("cost_price", -3.0).is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ensure_finite("cost_price", bad).unwrap_err();
            assert!(matches!(err, StoreError::NonFinite { ref field, .. } if field == "cost_price"));
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result: Loaded<Vec<String>> = read_json(&dir.path().join("none.json")).unwrap();
        assert!(matches!(result, Loaded::Missing));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/list.json");
        write_json(&path, &vec!["a".to_string(), "球体".to_string()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("球体"), "non-ASCII text should be written as-is");

        match read_json::<Vec<String>>(&path).unwrap() {
            Loaded::Found(v) => assert_eq!(v, vec!["a", "球体"]),
            Loaded::Missing => panic!("file should exist"),
        }
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[{not json").unwrap();

        let err = read_json::<Vec<String>>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_json(&blocker.join("data.json"), &Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
