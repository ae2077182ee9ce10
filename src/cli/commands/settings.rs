//! `rjq settings` command - Company settings shown on quotations

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{print_serialized, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::settings::SETTING_KEYS;

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show(ShowArgs),

    /// Set a setting (unknown keys are stored as text)
    Set(SetArgs),

    /// List known setting keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Setting key (e.g., company_name, show_cost_price)
    pub key: String,

    /// Value to set
    pub value: String,
}

/// Run a settings subcommand
pub fn run(cmd: SettingsCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SettingsCommands::Show(args) => run_show(args, global),
        SettingsCommands::Set(args) => run_set(args, global),
        SettingsCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.catalog(&[])?;
    store.check_settings().map_err(|e| miette::miette!("{}", e))?;
    let settings = store.settings();

    if let Some(key) = &args.key {
        return match settings.get(key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Setting '{}' is not set", key)),
        };
    }

    match session.format(global) {
        f @ (OutputFormat::Json | OutputFormat::Yaml) => print_serialized(settings, f),
        _ => {
            if !global.quiet {
                println!("{}", style("Settings").bold().underlined());
                println!();
            }
            for (key, value) in settings.entries() {
                println!("  {:<16} {}", style(key).cyan(), value);
            }
            Ok(())
        }
    }
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut store = session.catalog(&[])?;

    store
        .update_setting(&args.key, &args.value)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Set {} {} {}",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow()
        );
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Known settings keys").bold().underlined());
    println!();
    for (key, description) in SETTING_KEYS {
        println!("  {:<16} {}", style(key).cyan(), style(description).dim());
    }
    Ok(())
}
