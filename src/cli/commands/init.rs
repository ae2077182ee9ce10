//! `rjq init` command - Initialize a new quotation project

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::project::{Project, ProjectError, DEFAULT_DATA_DIR, MARKER_DIR};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite .rjq/config.yaml even if the project exists (data files are kept)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized quotation project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created project structure:");
            print_structure(project.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Add a sphere price",
                style("rjq sphere add --type DN50 --model A1 --cost 100").yellow()
            );
            println!(
                "  {} Import flange prices",
                style("rjq flange import flanges.csv").yellow()
            );
            println!(
                "  {} Build a quotation line",
                style("rjq quote add -i").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} Quotation project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("rjq init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(root: &Path) {
    println!("  {}/", style(MARKER_DIR).dim());
    println!("    config.yaml");
    println!("  {}/", style(DEFAULT_DATA_DIR).dim());
    for file in Project::data_files() {
        let marker = if root.join(DEFAULT_DATA_DIR).join(file).exists() {
            style("(kept)").dim().to_string()
        } else {
            style("(created on first save)").dim().to_string()
        };
        println!("    {} {}", file, marker);
    }
}
