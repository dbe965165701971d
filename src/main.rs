use anyhow::Result;
use clap::{Parser, Subcommand};

mod archive;
mod cli;
mod config;
mod docx;
mod gate;
mod llm;
mod pipeline;
mod selection;
mod session;
mod sheets;
mod table;
mod util;

#[derive(Parser)]
#[command(name = "coachgen", version)]
#[command(about = "Generate per-agent coaching plan documents from sheet data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate coaching plan documents for selected agents
    Generate {
        /// URL of the spreadsheet holding the performance data
        sheet_url: String,

        /// Global coaching date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Most recent rows per agent fed to the model (minimum 1)
        #[arg(long)]
        lookback: Option<usize>,

        /// Selection mode: "team" (roster only) or "search" (any agent in the sheet)
        #[arg(long, default_value = "team")]
        mode: String,

        /// Agent to include, optionally with its own date: "Last, First[=YYYY-MM-DD]"
        #[arg(short = 'a', long = "agent")]
        agents: Vec<String>,

        /// Select every roster agent (team mode)
        #[arg(long)]
        all: bool,

        /// Output directory for the documents and the batch archive
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Path to config file (defaults to ./coachgen.toml or ~/.config/coachgen/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Model identifier override (skips model discovery)
        #[arg(long)]
        model: Option<String>,

        /// Access password
        #[arg(long)]
        password: Option<String>,

        /// Use mock LLM client for testing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            sheet_url,
            date,
            lookback,
            mode,
            agents,
            all,
            output,
            config,
            model,
            password,
            dry_run,
        } => {
            cli::generate::run(
                sheet_url, date, lookback, mode, agents, all, output, config, model, password,
                dry_run,
            )
            .await?;
        }
    }

    Ok(())
}
