//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::SETTINGS_FILE;
use crate::core::ledger::QUOTATIONS_FILE;
use crate::entities::part::PartKind;

/// Name of the marker directory at the project root
pub const MARKER_DIR: &str = ".rjq";

/// Default data directory, relative to the project root
pub const DEFAULT_DATA_DIR: &str = "data";

/// A quoting project: a directory holding `.rjq/` and the data files
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .rjq/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(MARKER_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open the project rooted exactly at `root`
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        if root.join(MARKER_DIR).is_dir() {
            let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
            Ok(Self { root })
        } else {
            Err(ProjectError::NotFound {
                searched_from: root.to_path_buf(),
            })
        }
    }

    /// Use `--project` when given, otherwise discover from the working directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(root) => Self::open(root),
            None => Self::discover(),
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(MARKER_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_structure(root)
    }

    /// Force initialization even if .rjq/ exists; data files are kept
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_structure(root)
    }

    fn write_structure(root: PathBuf) -> Result<Self, ProjectError> {
        let marker = root.join(MARKER_DIR);
        std::fs::create_dir_all(&marker).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(marker.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::create_dir_all(root.join(DEFAULT_DATA_DIR))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Rubber joint quotation project configuration

# Markup used by `rjq quote add` when --profit is omitted
# default_profit: 30.0

# Quantity used by `rjq quote add` when --qty is omitted
# default_quantity: 1

# Currency symbol printed on exported quotations
# currency: "¥"

# Default output format for list commands (auto, tsv, json, yaml, csv, md)
# default_format: auto

# Data directory, relative to the project root
# data_dir: data
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .rjq configuration directory
    pub fn marker_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Project config file path
    pub fn config_path(&self) -> PathBuf {
        self.marker_dir().join("config.yaml")
    }

    /// Directory holding catalog, ledger and settings files
    pub fn data_dir(&self, configured: Option<&str>) -> PathBuf {
        self.root.join(configured.unwrap_or(DEFAULT_DATA_DIR))
    }

    /// All data file names the project may hold
    pub fn data_files() -> [&'static str; 4] {
        [
            PartKind::Sphere.file_name(),
            PartKind::Flange.file_name(),
            QUOTATIONS_FILE,
            SETTINGS_FILE,
        ]
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a quotation project (searched from {searched_from:?}). Run 'rjq init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("quotation project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
