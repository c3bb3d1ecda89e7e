//! Revgraph CLI - Review order for changed files
//!
//! Reads a changed-file list (JSON, `git diff --numstat`, or one path per
//! line) and prints or exports the review graph.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "revgraph")]
#[command(author = "Revgraph Contributors")]
#[command(version)]
#[command(about = "Suggests a review order for the files in a change", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/revgraph/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the review graph grouped by branch
    Analyze {
        /// File list to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print the graph as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Include node positions in the JSON output
        #[arg(long, requires = "json")]
        layout: bool,
    },

    /// Write the laid-out graph to a JSON file
    Export {
        /// File list to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "graph-data.json")]
        output: PathBuf,
    },

    /// Print files in suggested review order, one per line
    Order {
        /// File list to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Rank files by kind and show why each one is placed where it is
        #[arg(long)]
        reasons: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Analyze {
            input,
            json,
            layout,
        } => commands::analyze(&input, config, json, layout),
        Commands::Export { input, output } => commands::export(&input, &output, config),
        Commands::Order { input, reasons } => commands::order(&input, config, reasons),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
