//! Core module - storage, configuration and project layout

pub mod catalog;
pub mod config;
pub mod import;
pub mod ledger;
pub mod project;
pub mod settings;
pub mod storage;

pub use catalog::{CatalogStore, Upsert};
pub use config::Config;
pub use ledger::QuotationLedger;
pub use project::{Project, ProjectError};
pub use settings::Settings;
pub use storage::{LoadStatus, StoreError};
