mod commands;
mod config;
mod store;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, inspect, render, EditArgs, InspectArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Portyo CLI - render and edit bio pages
#[derive(Parser, Debug)]
#[command(name = "portyo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a bio JSON file to a static HTML page
    Render(RenderArgs),

    /// List a bio's blocks with their renderer tier
    Inspect(InspectArgs),

    /// Apply edits through a debounced edit session and save them
    Edit(EditArgs),
}

fn main() {
    // RUST_LOG=portyo_editor=debug shows the commit lifecycle.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Render(args) => render(args, &cwd),
            Command::Inspect(args) => inspect(args, &cwd),
            Command::Edit(args) => edit(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
