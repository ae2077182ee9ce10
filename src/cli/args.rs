//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, init::InitArgs, part::PartCommands, quote::QuoteCommands,
    settings::SettingsCommands,
};

#[derive(Parser)]
#[command(name = "rjq")]
#[command(author, version, about = "Rubber joint pricing and quotation tool")]
#[command(long_about = "Keep sphere and flange catalog prices and build marked-up quotations, stored as plain text files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project root (default: auto-detect by finding .rjq/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new quotation project
    Init(InitArgs),

    /// Sphere catalog management
    #[command(subcommand)]
    Sphere(PartCommands),

    /// Flange catalog management
    #[command(subcommand)]
    Flange(PartCommands),

    /// Quotation lines and export
    #[command(subcommand)]
    Quote(QuoteCommands),

    /// Company settings printed on quotations
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (aligned table)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
