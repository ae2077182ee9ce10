//! Print-style quotation document

use tabled::{builder::Builder, settings::Style};

use super::{QuoteReport, TITLE};

/// Fixed terms printed under the table
const REMARKS: &[&str] = &[
    "This quotation is valid for 30 days.",
    "Payment terms: 30% prepayment, balance paid before shipment.",
    "Delivery: within 15 working days after the contract is signed.",
];

/// Render the report as a Markdown document
pub fn render_document(report: &QuoteReport<'_>) -> String {
    let settings = report.settings;
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", TITLE));

    output.push_str(&format!("**Company:** {}  \n", settings.company_name));
    output.push_str(&format!("**Contact:** {}  \n", settings.contact_info));
    output.push_str(&format!("**Address:** {}  \n", settings.address));
    output.push_str(&format!("**Date:** {}\n\n", report.date_string()));

    // Build table with tabled
    let mut builder = Builder::default();
    builder.push_record(report.header_row());
    for row in report.rows() {
        builder.push_record(row);
    }
    builder.push_record(report.total_row());
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push_str("\n\n");

    output.push_str("**Remarks:**\n\n");
    for (i, remark) in REMARKS.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, remark));
    }

    output
}
