//! Entity type definitions
//!
//! - [`CatalogEntry`] - A priced sphere or flange, keyed by type and model
//! - [`QuotationLine`] - One sphere and two flanges with quantity and markup

pub mod part;
pub mod quotation;

pub use part::{CatalogEntry, PartKind};
pub use quotation::QuotationLine;
