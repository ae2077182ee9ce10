//! Catalog import from delimited text
//!
//! Produces typed entries for [`CatalogStore::bulk_import`]. Rows missing a
//! required cell or carrying an unparseable cost are skipped and reported;
//! deciding what to do with an empty batch is left to the store.
//!
//! [`CatalogStore::bulk_import`]: crate::core::catalog::CatalogStore::bulk_import

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::core::storage::StoreError;
use crate::entities::part::CatalogEntry;

/// Columns every import source must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["type_name", "model", "cost_price"];

/// A row left out of an import
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line in the source, counting the header as line 1
    pub row: usize,
    pub reason: String,
}

/// Parsed import rows
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub entries: Vec<CatalogEntry>,
    pub skipped: Vec<SkippedRow>,
}

/// Build a map from header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

/// Get a non-empty field value from a record
fn get_field<'r>(
    record: &'r StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<&'r str> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<CatalogEntry, String> {
    let type_name = get_field(record, header_map, "type_name")
        .ok_or_else(|| "missing type_name".to_string())?;
    let model =
        get_field(record, header_map, "model").ok_or_else(|| "missing model".to_string())?;
    let cost = get_field(record, header_map, "cost_price")
        .ok_or_else(|| "missing cost_price".to_string())?;
    let cost_price: f64 = cost
        .parse()
        .ok()
        .filter(|c: &f64| c.is_finite())
        .ok_or_else(|| format!("invalid cost_price '{}'", cost))?;

    Ok(CatalogEntry::new(type_name, model, cost_price))
}

/// Parse CSV text with a header row into catalog entries
pub fn parse_csv_entries<R: Read>(reader: R) -> Result<ImportBatch, StoreError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| StoreError::Parse {
            path: Default::default(),
            message: e.to_string(),
        })?
        .clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !header_map.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns(missing));
    }

    let mut batch = ImportBatch::default();
    for (row_idx, result) in rdr.records().enumerate() {
        let row = row_idx + 2;
        let parsed = result
            .map_err(|e| format!("CSV parse error: {}", e))
            .and_then(|record| parse_row(&record, &header_map));

        match parsed {
            Ok(entry) => batch.entries.push(entry),
            Err(reason) => {
                debug!(row, %reason, "skipping import row");
                batch.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    Ok(batch)
}

/// Read a CSV file into catalog entries
pub fn read_csv_entries(path: &Path) -> Result<ImportBatch, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    parse_csv_entries(BufReader::new(file)).map_err(|e| match e {
        StoreError::Parse { message, .. } => StoreError::parse(path, message),
        other => other,
    })
}

/// Header line plus one example row, suitable for redirecting to a file
pub fn csv_template() -> String {
    format!("{}\nDN50,A1,100.00\n", REQUIRED_COLUMNS.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_malformed_row_excluded() {
        let csv = "type_name,model,cost_price\nDN50,A1,100.0\nDN80,A2,bad\n";
        let batch = parse_csv_entries(csv.as_bytes()).unwrap();
        assert_eq!(batch.entries, vec![CatalogEntry::new("DN50", "A1", 100.0)]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].row, 3);
        assert!(batch.skipped[0].reason.contains("bad"));
    }

    #[test]
    fn test_non_finite_cost_skipped() {
        let csv = "type_name,model,cost_price\nDN50,A1,100\nDN65,A2,inf\nDN80,A3,NaN\n";
        let batch = parse_csv_entries(csv.as_bytes()).unwrap();
        assert_eq!(batch.entries, vec![CatalogEntry::new("DN50", "A1", 100.0)]);
        let rows: Vec<usize> = batch.skipped.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![3, 4]);
        assert!(batch.skipped[0].reason.contains("invalid cost_price 'inf'"));
    }

    #[test]
    fn test_headers_case_insensitive_and_reordered() {
        let csv = " Cost_Price ,MODEL,Type_Name,notes\n12.5,B1,F1,extra\n";
        let batch = parse_csv_entries(csv.as_bytes()).unwrap();
        assert_eq!(batch.entries, vec![CatalogEntry::new("F1", "B1", 12.5)]);
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "type_name,cost_price\nDN50,1.0\n";
        let err = parse_csv_entries(csv.as_bytes()).unwrap_err();
        match err {
            StoreError::MissingColumns(cols) => assert_eq!(cols, vec!["model"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_short_and_blank_rows_skipped() {
        let csv = "type_name,model,cost_price\nDN50,A1\n,A2,3.0\nDN65,A3,4\n";
        let batch = parse_csv_entries(csv.as_bytes()).unwrap();
        assert_eq!(batch.entries.len(), 1);
        assert_eq!(batch.entries[0].type_name, "DN65");
        assert_eq!(batch.skipped.len(), 2);
    }

    #[test]
    fn test_read_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spheres.csv");
        fs::write(&path, csv_template()).unwrap();

        let batch = read_csv_entries(&path).unwrap();
        assert_eq!(batch.entries, vec![CatalogEntry::new("DN50", "A1", 100.0)]);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_csv_entries(Path::new("/nonexistent/spheres.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
