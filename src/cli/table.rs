//! Table formatting utilities for CLI list commands
//!
//! One formatter serves catalog and quotation listings so every list command
//! honours `--format` the same way.

use console::style;
use csv::WriterBuilder;

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Zero-based position, used by `rm` (cyan)
    Index(usize),
    /// Plain text, truncated to the column width
    Text(String),
    /// Type name or category (yellow)
    Type(String),
    /// Money amount with two decimals, right aligned
    Money(f64),
    /// Percentage with no decimals
    Percent(f64),
    /// Integer value
    Number(i64),
}

impl CellValue {
    /// Unstyled value for CSV/Markdown output
    pub fn raw(&self) -> String {
        match self {
            CellValue::Index(i) => i.to_string(),
            CellValue::Text(s) | CellValue::Type(s) => s.clone(),
            CellValue::Money(v) => format!("{:.2}", v),
            CellValue::Percent(v) => format!("{:.0}", v),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// Visible width for column sizing
    pub fn display_width(&self) -> usize {
        self.raw().chars().count()
    }

    /// Padded, colored cell for terminal tables
    pub fn format_aligned(&self, width: usize) -> String {
        match self {
            CellValue::Index(i) => format!("{:<width$}", style(i).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width);
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Type(s) => {
                let truncated = truncate_str(s, width);
                format!("{:<width$}", style(truncated).yellow(), width = width)
            }
            CellValue::Money(_) | CellValue::Percent(_) | CellValue::Number(_) => {
                format!("{:>width$}", self.raw(), width = width)
            }
        }
    }
}

/// Column definition for table output
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    /// Maximum width before truncation
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// Formats rows of cells according to the output format
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Disable the trailing "N item(s)" line
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }

    /// Render rows in the given text format
    pub fn render(&self, rows: &[Vec<CellValue>], format: OutputFormat) -> String {
        match format {
            OutputFormat::Tsv => self.render_tsv(rows),
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => self.render_md(rows),
            _ => self.render_aligned(rows),
        }
    }

    pub fn output(&self, rows: &[Vec<CellValue>], format: OutputFormat) {
        print!("{}", self.render(rows, format));
    }

    /// Dynamic column widths: widest of header and content, capped per column
    fn calculate_widths(&self, rows: &[Vec<CellValue>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(CellValue::display_width)
                    .max()
                    .unwrap_or(0);
                col.header.len().max(max_content).min(col.width.max(col.header.len()))
            })
            .collect()
    }

    fn render_aligned(&self, rows: &[Vec<CellValue>]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| cell.format_aligned(*w))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        if self.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s) found.\n",
                style(rows.len()).cyan(),
                self.entity_name
            ));
        }
        out
    }

    fn render_tsv(&self, rows: &[Vec<CellValue>]) -> String {
        let mut out = String::new();
        let keys: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        out.push_str(&keys.join("\t"));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| c.raw().replace('\t', " ")).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn render_csv(&self, rows: &[Vec<CellValue>]) -> String {
        match self.write_csv(rows) {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!(error = %e, "failed to render CSV");
                String::new()
            }
        }
    }

    fn write_csv(&self, rows: &[Vec<CellValue>]) -> Result<String, csv::Error> {
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        wtr.write_record(self.columns.iter().map(|c| c.key))?;
        for row in rows {
            wtr.write_record(row.iter().map(CellValue::raw))?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render_md(&self, rows: &[Vec<CellValue>]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", headers.join(" | ")));
        out.push_str(&format!(
            "|{}|\n",
            self.columns.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| c.raw().replace('|', "\\|")).collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("index", "#", 4),
        ColumnDef::new("type_name", "TYPE", 12),
        ColumnDef::new("cost_price", "COST", 12),
    ];

    fn rows() -> Vec<Vec<CellValue>> {
        vec![
            vec![
                CellValue::Index(0),
                CellValue::Type("DN50".into()),
                CellValue::Money(100.0),
            ],
            vec![
                CellValue::Index(1),
                CellValue::Type("Big, Flange".into()),
                CellValue::Money(20.5),
            ],
        ]
    }

    #[test]
    fn test_csv_output() {
        let out = TableFormatter::new(COLUMNS, "sphere").render(&rows(), OutputFormat::Csv);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "index,type_name,cost_price");
        assert_eq!(lines[1], "0,DN50,100.00");
        assert_eq!(lines[2], "1,\"Big, Flange\",20.50");
    }

    #[test]
    fn test_csv_quotes_line_breaks_and_quotes() {
        let rows = vec![
            vec![
                CellValue::Index(0),
                CellValue::Type("two\nlines".into()),
                CellValue::Money(1.0),
            ],
            vec![
                CellValue::Index(1),
                CellValue::Type("say \"hi\"\r".into()),
                CellValue::Money(2.0),
            ],
        ];
        let out = TableFormatter::new(COLUMNS, "sphere").render(&rows, OutputFormat::Csv);

        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let parsed: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(&parsed[0][1], "two\nlines");
        assert_eq!(&parsed[1][1], "say \"hi\"\r");
        assert!(out.contains("\"two\nlines\""));
    }

    #[test]
    fn test_tsv_output() {
        let out = TableFormatter::new(COLUMNS, "sphere").render(&rows(), OutputFormat::Tsv);
        assert_eq!(out.lines().nth(1), Some("0\tDN50\t100.00"));
    }

    #[test]
    fn test_md_output() {
        let out = TableFormatter::new(COLUMNS, "sphere").render(&rows(), OutputFormat::Md);
        assert!(out.starts_with("| # | TYPE | COST |\n|---|---|---|\n"));
        assert!(out.contains("| 1 | Big, Flange | 20.50 |"));
    }

    #[test]
    fn test_aligned_summary() {
        let out = TableFormatter::new(COLUMNS, "sphere").render(&rows(), OutputFormat::Auto);
        assert!(out.contains("100.00"));
        assert!(out.contains("sphere(s) found."));

        let quiet = TableFormatter::new(COLUMNS, "sphere")
            .quiet(true)
            .render(&rows(), OutputFormat::Auto);
        assert!(!quiet.contains("found"));
    }

    #[test]
    fn test_money_right_aligned() {
        assert_eq!(CellValue::Money(5.0).format_aligned(8), "    5.00");
        assert_eq!(CellValue::Percent(29.6).raw(), "30");
    }
}
