//! RJQ: Rubber Joint Quotation
//!
//! Keeps sphere and flange catalog prices as plain JSON files and builds
//! marked-up quotations from them.

pub mod cli;
pub mod core;
pub mod entities;
pub mod logging;
pub mod report;
