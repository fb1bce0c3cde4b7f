//! FEA-Bench instance loader CLI
//!
//! Converts FEA-Bench `.jsonl` files into batch instances.

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::OutputFormat, LoadArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fea-bench", version)]
#[command(about = "Convert FEA-Bench instances into batch instances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert instances and write them out
    Convert {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "jsonl")]
        format: OutputFormat,
    },
    /// List instances with their repository and base commit
    List {
        #[command(flatten)]
        load: LoadArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fea_bench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        style::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            load,
            output,
            format,
        } => commands::convert::run(&load, output, format).await,
        Commands::List { load } => commands::list::run(&load).await,
    }
}
