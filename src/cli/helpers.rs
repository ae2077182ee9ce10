//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CatalogStore, Config, Project, QuotationLedger};
use crate::entities::part::PartKind;

/// Project, merged configuration and data location for one command
#[derive(Debug)]
pub struct Session {
    pub project: Project,
    pub config: Config,
    pub data_dir: PathBuf,
}

impl Session {
    /// Locate the project (honouring `--project`) and load its configuration
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project =
            Project::locate(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
        let config = Config::load(Some(&project));
        let data_dir = project.data_dir(config.data_dir.as_deref());
        Ok(Self {
            project,
            config,
            data_dir,
        })
    }

    /// Catalog with every data file loaded
    ///
    /// Fails only when one of `needs` could not be read. Unreadable files the
    /// command does not touch are reported as warnings.
    pub fn catalog(&self, needs: &[PartKind]) -> Result<CatalogStore> {
        let store = CatalogStore::open(&self.data_dir);
        for kind in PartKind::ALL {
            if let Err(e) = store.check(kind) {
                if needs.contains(&kind) {
                    return Err(miette::miette!("{}", e));
                }
                tracing::warn!(%kind, error = %e, "catalog file unreadable; continuing without it");
            }
        }
        Ok(store)
    }

    /// Quotation ledger with its data file loaded
    pub fn ledger(&self) -> Result<QuotationLedger> {
        QuotationLedger::open(&self.data_dir).map_err(|e| miette::miette!("{}", e))
    }

    /// Resolve `auto` against the configured default format
    pub fn format(&self, global: &GlobalOpts) -> OutputFormat {
        resolve_format(global.format, self.config.default_format.as_deref())
    }
}

/// `auto` falls back to the configured format, then to an aligned table
pub fn resolve_format(requested: OutputFormat, configured: Option<&str>) -> OutputFormat {
    match requested {
        OutputFormat::Auto => configured
            .and_then(|s| OutputFormat::from_str(s, true).ok())
            .unwrap_or(OutputFormat::Auto),
        f => f,
    }
}

/// Print a serializable value as JSON or YAML
pub fn print_serialized<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(value).into_diagnostic()?),
        _ => println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?),
    }
    Ok(())
}

/// Split a `TYPE:MODEL` reference
pub fn parse_part_ref(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((t, m)) if !t.trim().is_empty() && !m.trim().is_empty() => {
            Ok((t.trim().to_string(), m.trim().to_string()))
        }
        _ => Err(format!("Invalid part reference '{}'. Use TYPE:MODEL", s)),
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Counts characters, not bytes, so CJK descriptions are cut safely.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a number that must be finite (no NaN or infinity)
pub fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", s))
    }
}
