//! Spreadsheet rendering as CSV rows

use csv::WriterBuilder;
use std::io::Write;

use super::{QuoteReport, TITLE};

/// Write the report as a CSV sheet: a header block, a blank row, the table
/// and the total row.
pub fn write_sheet<W: Write>(report: &QuoteReport<'_>, writer: W) -> Result<(), csv::Error> {
    let settings = report.settings;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record([TITLE])?;
    wtr.write_record([format!("Company: {}", settings.company_name)])?;
    wtr.write_record([format!("Contact: {}", settings.contact_info)])?;
    wtr.write_record([format!("Date: {}", report.date_string())])?;
    wtr.write_record([""])?;

    wtr.write_record(report.header_row())?;
    for row in report.rows() {
        wtr.write_record(row)?;
    }
    wtr.write_record(report.total_row())?;

    wtr.flush()?;
    Ok(())
}
