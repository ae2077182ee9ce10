//! `rjq sphere` / `rjq flange` commands - Catalog price management
//!
//! Both catalogs share one command set; the top-level subcommand picks the
//! collection.

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{parse_finite, print_serialized, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::Upsert;
use crate::core::import::{csv_template, read_csv_entries};
use crate::entities::part::{CatalogEntry, PartKind};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// Add an entry, or update the cost of an existing type/model
    Add(AddArgs),

    /// List entries with their positions
    List(ListArgs),

    /// Remove the entry at a position shown by `list`
    Rm(RmArgs),

    /// List distinct type names
    Types,

    /// List distinct models
    Models(ModelsArgs),

    /// Show one entry
    Show(ShowArgs),

    /// Replace the whole catalog from a CSV file
    Import(ImportArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Type name (e.g. DN50)
    #[arg(long = "type", short = 't')]
    pub type_name: String,

    /// Model
    #[arg(long, short = 'm')]
    pub model: String,

    /// Cost price of one unit
    #[arg(long, short = 'c', allow_negative_numbers = true, value_parser = parse_finite)]
    pub cost: f64,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only entries of this type
    #[arg(long = "type", short = 't')]
    pub type_name: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Zero-based position from `list`
    pub index: usize,
}

#[derive(clap::Args, Debug)]
pub struct ModelsArgs {
    /// Only models of this type
    #[arg(long = "type", short = 't')]
    pub type_name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[arg(long = "type", short = 't')]
    pub type_name: String,

    #[arg(long, short = 'm')]
    pub model: String,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with type_name, model and cost_price columns
    #[arg(required_unless_present = "template")]
    pub file: Option<PathBuf>,

    /// Print a CSV template instead of importing
    #[arg(long)]
    pub template: bool,

    /// Parse and report without changing the catalog
    #[arg(long)]
    pub dry_run: bool,
}

const PART_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("index", "#", 5),
    ColumnDef::new("type_name", "TYPE", 20),
    ColumnDef::new("model", "MODEL", 24),
    ColumnDef::new("cost_price", "COST", 14),
];

/// Run a catalog subcommand against one collection
pub fn run(cmd: PartCommands, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::Add(args) => run_add(args, kind, global),
        PartCommands::List(args) => run_list(args, kind, global),
        PartCommands::Rm(args) => run_rm(args, kind, global),
        PartCommands::Types => run_types(kind, global),
        PartCommands::Models(args) => run_models(args, kind, global),
        PartCommands::Show(args) => run_show(args, kind, global),
        PartCommands::Import(args) => run_import(args, kind, global),
    }
}

fn run_add(args: AddArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    if args.type_name.trim().is_empty() || args.model.trim().is_empty() {
        return Err(miette::miette!("Type and model must not be empty"));
    }

    let session = Session::open(global)?;
    let mut store = session.catalog(&[kind])?;
    let entry = CatalogEntry::new(args.type_name.trim(), args.model.trim(), args.cost);
    let label = format!("{} {}", entry.type_name, entry.model);

    let outcome = store
        .upsert(kind, entry)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        match outcome {
            Upsert::Inserted(index) => println!(
                "{} Added {} {} at position {} (cost {:.2})",
                style("✓").green(),
                kind,
                style(&label).cyan(),
                style(index).cyan(),
                args.cost
            ),
            Upsert::Updated {
                index,
                previous_cost,
            } => println!(
                "{} Updated {} {} at position {}: cost {:.2} {} {:.2}",
                style("✓").green(),
                kind,
                style(&label).cyan(),
                style(index).cyan(),
                previous_cost,
                style("→").dim(),
                args.cost
            ),
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[kind])?;

    let entries: Vec<(usize, &CatalogEntry)> = store
        .entries(kind)
        .iter()
        .enumerate()
        .filter(|(_, e)| {
            args.type_name
                .as_deref()
                .map_or(true, |t| e.type_name == t)
        })
        .collect();

    if args.count {
        println!("{}", entries.len());
        return Ok(());
    }

    let format = session.format(global);
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        let plain: Vec<&CatalogEntry> = entries.iter().map(|(_, e)| *e).collect();
        return print_serialized(&plain, format);
    }

    if entries.is_empty() && format == OutputFormat::Auto {
        println!("No {} entries found.", kind);
        return Ok(());
    }

    let rows: Vec<Vec<CellValue>> = entries
        .iter()
        .map(|(i, e)| {
            vec![
                CellValue::Index(*i),
                CellValue::Type(e.type_name.clone()),
                CellValue::Text(e.model.clone()),
                CellValue::Money(e.cost_price),
            ]
        })
        .collect();

    TableFormatter::new(PART_COLUMNS, kind.as_str())
        .quiet(global.quiet)
        .output(&rows, format);
    Ok(())
}

fn run_rm(args: RmArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut store = session.catalog(&[kind])?;

    let removed = store
        .remove(kind, args.index)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Removed {} {} {}",
            style("✓").green(),
            kind,
            style(&removed.type_name).cyan(),
            style(&removed.model).cyan()
        );
    }
    Ok(())
}

fn print_names(names: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(names, format),
        _ => {
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn run_types(kind: PartKind, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[kind])?;
    print_names(&store.list_types(kind), session.format(global))
}

fn run_models(args: ModelsArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[kind])?;
    print_names(
        &store.list_models(kind, args.type_name.as_deref()),
        session.format(global),
    )
}

fn run_show(args: ShowArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[kind])?;

    let entry = store
        .require(kind, &args.type_name, &args.model)
        .map_err(|e| miette::miette!("{}", e))?;

    match session.format(global) {
        f @ (OutputFormat::Json | OutputFormat::Yaml) => print_serialized(entry, f),
        _ => {
            println!("{} {}", style("type_name:").dim(), entry.type_name);
            println!("{} {}", style("model:").dim(), entry.model);
            println!("{} {:.2}", style("cost_price:").dim(), entry.cost_price);
            Ok(())
        }
    }
}

fn run_import(args: ImportArgs, kind: PartKind, global: &GlobalOpts) -> Result<()> {
    if args.template {
        print!("{}", csv_template());
        eprintln!();
        eprintln!(
            "{} Template generated. Redirect to file: rjq {} import --template > {}s.csv",
            style("→").blue(),
            kind,
            kind
        );
        return Ok(());
    }

    let file_path = args
        .file
        .ok_or_else(|| miette::miette!("CSV file required. Usage: rjq {} import data.csv", kind))?;
    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    let session = Session::open(global)?;
    let mut store = session.catalog(&[kind])?;

    if !global.quiet {
        println!(
            "{} Importing {} entries from {}{}",
            style("→").blue(),
            style(kind).cyan(),
            style(file_path.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
    }

    let batch = read_csv_entries(&file_path).map_err(|e| miette::miette!("{}", e))?;
    for skipped in &batch.skipped {
        eprintln!(
            "{} Row {}: {}",
            style("✗").red(),
            skipped.row,
            skipped.reason
        );
    }

    if args.dry_run {
        println!(
            "{} Would replace {} {} entries with {} row(s) ({} skipped)",
            style("✓").green(),
            store.len(kind),
            kind,
            batch.entries.len(),
            batch.skipped.len()
        );
        return Ok(());
    }

    let skipped = batch.skipped.len();
    let count = store
        .bulk_import(kind, batch.entries)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Imported {} {} entries ({} row(s) skipped)",
            style("✓").green(),
            style(count).cyan(),
            kind,
            skipped
        );
    }
    Ok(())
}
