//! Quotation documents - print-style Markdown and CSV spreadsheet
//!
//! Both renderings share one column model: cost and profit columns appear only
//! when cost is shown, and a trailing total row sums the sale totals.

mod print;
mod sheet;

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::settings::Settings;
use crate::core::storage::StoreError;
use crate::entities::quotation::QuotationLine;

pub use print::render_document;
pub use sheet::write_sheet;

/// Document title
pub const TITLE: &str = "Quotation";

/// Label of the trailing total row
pub const TOTAL_LABEL: &str = "Total";

/// Which rendering to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Print-ready Markdown document
    Document,
    /// Spreadsheet rows as CSV
    Sheet,
}

impl DocumentKind {
    /// `.csv` files get a sheet, anything else a document
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DocumentKind::Sheet,
            _ => DocumentKind::Document,
        }
    }
}

/// A column of the quotation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Description,
    Quantity,
    UnitCost,
    TotalCost,
    ProfitPct,
    UnitPrice,
    TotalPrice,
}

const COLUMNS_WITH_COST: &[Column] = &[
    Column::Description,
    Column::Quantity,
    Column::UnitCost,
    Column::TotalCost,
    Column::ProfitPct,
    Column::UnitPrice,
    Column::TotalPrice,
];

const COLUMNS_WITHOUT_COST: &[Column] = &[
    Column::Description,
    Column::Quantity,
    Column::UnitPrice,
    Column::TotalPrice,
];

impl Column {
    pub fn header(&self, currency: &str) -> String {
        match self {
            Column::Description => "Description".to_string(),
            Column::Quantity => "Quantity".to_string(),
            Column::UnitCost => format!("Unit Cost ({})", currency),
            Column::TotalCost => format!("Total Cost ({})", currency),
            Column::ProfitPct => "Profit (%)".to_string(),
            Column::UnitPrice => format!("Unit Price ({})", currency),
            Column::TotalPrice => format!("Total Price ({})", currency),
        }
    }

    pub fn cell(&self, line: &QuotationLine) -> String {
        match self {
            Column::Description => line.description(),
            Column::Quantity => line.quantity().to_string(),
            Column::UnitCost => format!("{:.2}", line.unit_cost()),
            Column::TotalCost => format!("{:.2}", line.total_cost()),
            Column::ProfitPct => format!("{:.0}", line.profit_percentage()),
            Column::UnitPrice => format!("{:.2}", line.unit_price()),
            Column::TotalPrice => format!("{:.2}", line.total_price()),
        }
    }
}

/// Column set for a document
pub fn columns(show_cost: bool) -> &'static [Column] {
    if show_cost {
        COLUMNS_WITH_COST
    } else {
        COLUMNS_WITHOUT_COST
    }
}

/// Data handed to the renderers
#[derive(Debug, Clone)]
pub struct QuoteReport<'a> {
    pub lines: &'a [QuotationLine],
    pub settings: &'a Settings,
    pub show_cost: bool,
    pub currency: String,
    pub date: NaiveDate,
}

impl<'a> QuoteReport<'a> {
    pub fn new(
        lines: &'a [QuotationLine],
        settings: &'a Settings,
        show_cost: bool,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            lines,
            settings,
            show_cost,
            currency: currency.into(),
            date,
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        columns(self.show_cost)
    }

    pub fn header_row(&self) -> Vec<String> {
        self.columns()
            .iter()
            .map(|c| c.header(&self.currency))
            .collect()
    }

    /// One formatted row per line, in ledger order
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.lines
            .iter()
            .map(|line| self.columns().iter().map(|c| c.cell(line)).collect())
            .collect()
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(QuotationLine::total_price).sum()
    }

    /// Label in the first cell, grand total in the last, blanks between
    pub fn total_row(&self) -> Vec<String> {
        let width = self.columns().len();
        let mut row = vec![String::new(); width];
        row[0] = TOTAL_LABEL.to_string();
        row[width - 1] = format!("{:.2}", self.total_price());
        row
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Render a report to a file
pub fn export_to_file(
    report: &QuoteReport<'_>,
    path: &Path,
    kind: DocumentKind,
) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    match kind {
        DocumentKind::Document => writer
            .write_all(render_document(report).as_bytes())
            .map_err(|e| StoreError::io(path, e))?,
        DocumentKind::Sheet => write_sheet(report, &mut writer).map_err(|e| StoreError::io(path, e))?,
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}
