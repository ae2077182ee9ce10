//! CLI command implementations

pub mod completions;
pub mod init;
pub mod part;
pub mod quote;
pub mod settings;
