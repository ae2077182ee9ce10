//! `rjq quote` command - Quotation lines and export

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{parse_finite, parse_part_ref, print_serialized, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::CatalogStore;
use crate::entities::part::{CatalogEntry, PartKind};
use crate::entities::quotation::QuotationLine;
use crate::report::{export_to_file, DocumentKind, QuoteReport};

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    /// Add a quotation line from catalog entries
    Add(AddArgs),

    /// List quotation lines with derived prices
    List(ListArgs),

    /// Remove the line at a position shown by `list`
    Rm(RmArgs),

    /// Remove every line
    Clear(ClearArgs),

    /// Write the quotation to a document or sheet
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Sphere as TYPE:MODEL
    #[arg(long, value_parser = parse_part_ref, required_unless_present = "interactive")]
    pub sphere: Option<(String, String)>,

    /// First flange as TYPE:MODEL
    #[arg(long, value_parser = parse_part_ref, required_unless_present = "interactive")]
    pub flange1: Option<(String, String)>,

    /// Second flange as TYPE:MODEL (default: same as --flange1)
    #[arg(long, value_parser = parse_part_ref)]
    pub flange2: Option<(String, String)>,

    /// Quantity (default from config, else 1)
    #[arg(long, allow_negative_numbers = true)]
    pub qty: Option<i64>,

    /// Profit percentage (default from config, else 30)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub profit: Option<f64>,

    /// Pick parts from the catalogs interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include cost columns
    #[arg(long)]
    pub show_cost: bool,

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
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (.csv writes a sheet, anything else a document)
    pub output: PathBuf,

    /// Force sheet (CSV) output
    #[arg(long, conflicts_with = "doc")]
    pub sheet: bool,

    /// Force print document (Markdown) output
    #[arg(long)]
    pub doc: bool,

    /// Include cost columns (default from settings)
    #[arg(long, conflicts_with = "hide_cost")]
    pub show_cost: bool,

    /// Omit cost columns
    #[arg(long)]
    pub hide_cost: bool,
}

const LINE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("index", "#", 4),
    ColumnDef::new("description", "DESCRIPTION", 36),
    ColumnDef::new("quantity", "QTY", 6),
    ColumnDef::new("unit_price", "UNIT PRICE", 12),
    ColumnDef::new("total_price", "TOTAL", 14),
];

const LINE_COLUMNS_WITH_COST: &[ColumnDef] = &[
    ColumnDef::new("index", "#", 4),
    ColumnDef::new("description", "DESCRIPTION", 36),
    ColumnDef::new("quantity", "QTY", 6),
    ColumnDef::new("unit_cost", "UNIT COST", 12),
    ColumnDef::new("profit_percentage", "PROFIT %", 8),
    ColumnDef::new("unit_price", "UNIT PRICE", 12),
    ColumnDef::new("total_price", "TOTAL", 14),
];

/// Run a quote subcommand
pub fn run(cmd: QuoteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        QuoteCommands::Add(args) => run_add(args, global),
        QuoteCommands::List(args) => run_list(args, global),
        QuoteCommands::Rm(args) => run_rm(args, global),
        QuoteCommands::Clear(args) => run_clear(args, global),
        QuoteCommands::Export(args) => run_export(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&PartKind::ALL)?;
    let mut ledger = session.ledger()?;

    let (sphere, flange1, flange2, qty, profit) = if args.interactive {
        let theme = ColorfulTheme::default();
        let sphere = pick_entry(&store, PartKind::Sphere, "Sphere", &theme)?;
        let flange1 = pick_entry(&store, PartKind::Flange, "Flange 1", &theme)?;
        let flange2 = pick_entry(&store, PartKind::Flange, "Flange 2", &theme)?;

        let qty: i64 = Input::with_theme(&theme)
            .with_prompt("Quantity")
            .default(args.qty.unwrap_or_else(|| session.config.quantity()))
            .interact_text()
            .into_diagnostic()?;
        let profit: f64 = Input::with_theme(&theme)
            .with_prompt("Profit %")
            .default(args.profit.unwrap_or_else(|| session.config.profit()))
            .validate_with(|v: &f64| {
                if v.is_finite() {
                    Ok(())
                } else {
                    Err("must be a finite number")
                }
            })
            .interact_text()
            .into_diagnostic()?;

        (sphere, flange1, flange2, qty, profit)
    } else {
        let (s_type, s_model) = args
            .sphere
            .ok_or_else(|| miette::miette!("--sphere is required"))?;
        let (f_type, f_model) = args
            .flange1
            .ok_or_else(|| miette::miette!("--flange1 is required"))?;
        let (f2_type, f2_model) = args
            .flange2
            .unwrap_or_else(|| (f_type.clone(), f_model.clone()));

        let lookup = |kind: PartKind, t: &str, m: &str| {
            store
                .require(kind, t, m)
                .cloned()
                .map_err(|e| miette::miette!("{}", e))
        };

        (
            lookup(PartKind::Sphere, &s_type, &s_model)?,
            lookup(PartKind::Flange, &f_type, &f_model)?,
            lookup(PartKind::Flange, &f2_type, &f2_model)?,
            args.qty.unwrap_or_else(|| session.config.quantity()),
            args.profit.unwrap_or_else(|| session.config.profit()),
        )
    };

    let line = QuotationLine::new(Some(&sphere), Some(&flange1), Some(&flange2), qty, profit);
    let currency = session.config.currency().to_string();
    let summary = format!(
        "{} x{} at {}{:.2} = {}{:.2}",
        line.description(),
        line.quantity(),
        currency,
        line.unit_price(),
        currency,
        line.total_price()
    );

    let index = ledger.add(line).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Added line {}: {}",
            style("✓").green(),
            style(index).cyan(),
            summary
        );
    }
    Ok(())
}

/// Prompt for a type, then a model of that type
fn pick_entry(
    store: &CatalogStore,
    kind: PartKind,
    label: &str,
    theme: &ColorfulTheme,
) -> Result<CatalogEntry> {
    let types = store.list_types(kind);
    if types.is_empty() {
        return Err(miette::miette!(
            "No {} entries yet. Add some with: rjq {} add",
            kind,
            kind
        ));
    }

    let type_idx = Select::with_theme(theme)
        .with_prompt(format!("{} type", label))
        .items(&types)
        .default(0)
        .interact()
        .into_diagnostic()?;
    let type_name = &types[type_idx];

    let models = store.list_models(kind, Some(type_name));
    let model_idx = Select::with_theme(theme)
        .with_prompt(format!("{} model", label))
        .items(&models)
        .default(0)
        .interact()
        .into_diagnostic()?;

    store
        .require(kind, type_name, &models[model_idx])
        .cloned()
        .map_err(|e| miette::miette!("{}", e))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let ledger = session.ledger()?;

    if args.count {
        println!("{}", ledger.len());
        return Ok(());
    }

    let format = session.format(global);
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        return print_serialized(ledger.lines(), format);
    }

    if ledger.is_empty() && format == OutputFormat::Auto {
        println!("No quotation lines yet.");
        return Ok(());
    }

    let columns = if args.show_cost {
        LINE_COLUMNS_WITH_COST
    } else {
        LINE_COLUMNS
    };

    let rows: Vec<Vec<CellValue>> = ledger
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut row = vec![
                CellValue::Index(i),
                CellValue::Text(line.description()),
                CellValue::Number(line.quantity()),
            ];
            if args.show_cost {
                row.push(CellValue::Money(line.unit_cost()));
                row.push(CellValue::Percent(line.profit_percentage()));
            }
            row.push(CellValue::Money(line.unit_price()));
            row.push(CellValue::Money(line.total_price()));
            row
        })
        .collect();

    TableFormatter::new(columns, "line")
        .quiet(global.quiet)
        .output(&rows, format);

    if format == OutputFormat::Auto && !global.quiet {
        println!(
            "{} {}{:.2}",
            style("Total:").bold(),
            session.config.currency(),
            ledger.total_price()
        );
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut ledger = session.ledger()?;

    let removed = ledger
        .remove(args.index)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Removed line {}: {}",
            style("✓").green(),
            style(args.index).cyan(),
            removed.description()
        );
    }
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut ledger = session.ledger()?;

    if ledger.is_empty() {
        if !global.quiet {
            println!("No quotation lines to clear.");
        }
        return Ok(());
    }

    if !args.yes {
        print!("Remove all {} quotation line(s)? [y/N] ", ledger.len());
        std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).into_diagnostic()?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let count = ledger.clear().map_err(|e| miette::miette!("{}", e))?;
    if !global.quiet {
        println!(
            "{} Cleared {} quotation line(s)",
            style("✓").green(),
            style(count).cyan()
        );
    }
    Ok(())
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[])?;
    store.check_settings().map_err(|e| miette::miette!("{}", e))?;
    let ledger = session.ledger()?;

    let kind = if args.sheet {
        DocumentKind::Sheet
    } else if args.doc {
        DocumentKind::Document
    } else {
        DocumentKind::from_path(&args.output)
    };

    let show_cost = if args.show_cost {
        true
    } else if args.hide_cost {
        false
    } else {
        store.settings().show_cost_price
    };

    if ledger.is_empty() {
        eprintln!(
            "{} No quotation lines; exporting an empty quotation",
            style("!").yellow()
        );
    }

    let report = QuoteReport::new(
        ledger.lines(),
        store.settings(),
        show_cost,
        session.config.currency(),
        chrono::Local::now().date_naive(),
    );
    export_to_file(&report, &args.output, kind).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Exported {} line(s) to {} ({}{:.2})",
            style("✓").green(),
            ledger.len(),
            style(args.output.display()).cyan(),
            session.config.currency(),
            report.total_price()
        );
    }
    Ok(())
}
