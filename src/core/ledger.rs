//! Quotation ledger - the ordered lines of the quotation being built
//!
//! Insertion order is the order lines appear in exported documents and is
//! never changed. Like the catalog store, every mutation is saved before
//! returning.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::storage::{ensure_finite, read_json, write_json, LoadStatus, Loaded, StoreError};
use crate::entities::quotation::QuotationLine;

/// File holding the ledger
pub const QUOTATIONS_FILE: &str = "quotations.json";

#[derive(Debug)]
pub struct QuotationLedger {
    path: PathBuf,
    lines: Vec<QuotationLine>,
}

impl QuotationLedger {
    /// Empty ledger stored under `data_dir`, nothing read yet
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(QUOTATIONS_FILE),
            lines: Vec::new(),
        }
    }

    /// Create a ledger and load its file if present
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut ledger = Self::new(data_dir);
        ledger.load()?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[QuotationLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line's sale total
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(QuotationLine::total_price).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(QuotationLine::total_cost).sum()
    }

    pub fn load(&mut self) -> Result<LoadStatus, StoreError> {
        match read_json::<Vec<QuotationLine>>(&self.path) {
            Ok(Loaded::Found(lines)) => {
                debug!(path = %self.path.display(), count = lines.len(), "loaded quotations");
                self.lines = lines;
                Ok(LoadStatus::Loaded(self.lines.len()))
            }
            Ok(Loaded::Missing) => Ok(LoadStatus::NotFound),
            Err(e) => {
                warn!(error = %e, "failed to load quotations");
                Err(e)
            }
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_json(&self.path, &self.lines)
            .inspect(|_| debug!(path = %self.path.display(), count = self.lines.len(), "saved quotations"))
            .inspect_err(|e| warn!(error = %e, "failed to save quotations"))
    }

    /// Append a line; returns its position
    pub fn add(&mut self, line: QuotationLine) -> Result<usize, StoreError> {
        ensure_finite("sphere cost_price", line.sphere().cost_price)?;
        ensure_finite("flange1 cost_price", line.flange1().cost_price)?;
        ensure_finite("flange2 cost_price", line.flange2().cost_price)?;
        ensure_finite("profit_percentage", line.profit_percentage())?;
        self.lines.push(line);
        self.save()?;
        Ok(self.lines.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<QuotationLine, StoreError> {
        if index >= self.lines.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        let removed = self.lines.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Drop every line; returns how many were removed
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let count = self.lines.len();
        self.lines.clear();
        self.save()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::part::CatalogEntry;
    use tempfile::tempdir;

    fn line(sphere_model: &str, qty: i64) -> QuotationLine {
        let sphere = CatalogEntry::new("DN50", sphere_model, 100.0);
        let flange = CatalogEntry::new("F1", "B1", 20.0);
        QuotationLine::new(Some(&sphere), Some(&flange), Some(&flange), qty, 30.0)
    }

    #[test]
    fn test_add_rejects_non_finite_values() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        ledger.add(line("A1", 1)).unwrap();

        let sphere = CatalogEntry::new("DN50", "A1", 100.0);
        let flange = CatalogEntry::new("F1", "B1", 20.0);
        let nan_profit =
            QuotationLine::new(Some(&sphere), Some(&flange), Some(&flange), 1, f64::NAN);
        assert!(matches!(
            ledger.add(nan_profit),
            Err(StoreError::NonFinite { .. })
        ));

        let inf_flange = CatalogEntry::new("F1", "B1", f64::INFINITY);
        let inf_cost =
            QuotationLine::new(Some(&sphere), Some(&flange), Some(&inf_flange), 1, 30.0);
        assert!(matches!(
            ledger.add(inf_cost),
            Err(StoreError::NonFinite { .. })
        ));

        assert_eq!(ledger.len(), 1);
        let reopened = QuotationLedger::open(tmp.path()).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_add_preserves_order_and_persists() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        assert_eq!(ledger.add(line("A1", 1)).unwrap(), 0);
        assert_eq!(ledger.add(line("A2", 2)).unwrap(), 1);
        assert_eq!(ledger.add(line("A3", 3)).unwrap(), 2);

        let reopened = QuotationLedger::open(tmp.path()).unwrap();
        let models: Vec<&str> = reopened
            .lines()
            .iter()
            .map(|l| l.sphere().model.as_str())
            .collect();
        assert_eq!(models, vec!["A1", "A2", "A3"]);
        assert_eq!(reopened.lines(), ledger.lines());
    }

    #[test]
    fn test_totals() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        ledger.add(line("A1", 2)).unwrap();
        ledger.add(line("A2", 1)).unwrap();
        assert!((ledger.total_cost() - 420.0).abs() < 1e-9);
        assert!((ledger.total_price() - 546.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        ledger.add(line("A1", 1)).unwrap();
        ledger.add(line("A2", 1)).unwrap();

        let removed = ledger.remove(0).unwrap();
        assert_eq!(removed.sphere().model, "A1");
        assert_eq!(ledger.len(), 1);

        let err = ledger.remove(5).unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        ledger.add(line("A1", 1)).unwrap();
        assert_eq!(ledger.clear().unwrap(), 1);
        assert!(ledger.is_empty());

        let mut fresh = QuotationLedger::new(tmp.path());
        assert_eq!(fresh.load().unwrap(), LoadStatus::Loaded(0));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempdir().unwrap();
        let mut ledger = QuotationLedger::new(tmp.path());
        assert_eq!(ledger.load().unwrap(), LoadStatus::NotFound);
        assert_eq!(ledger.total_price(), 0.0);
    }
}
