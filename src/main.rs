use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use covdash::config::Config;
use covdash::coverage::Summary;
use covdash::history::record;
use covdash::report::generate_dashboard;

#[derive(Parser)]
#[command(name = "covdash")]
#[command(about = "Coverage summary and quality-trend dashboard for LCOV reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: covdash.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print aggregate line coverage of an LCOV report
    Summary {
        /// LCOV report (default: coverage/lcov.info)
        lcov: Option<PathBuf>,
    },

    /// Render the coverage history as an HTML dashboard
    Dashboard {
        /// JSON history file (default: coverage_history.json)
        history: Option<PathBuf>,

        /// Output HTML file (default: index.html)
        output: Option<PathBuf>,
    },

    /// Append the current coverage to the history file
    Record {
        /// LCOV report (default: coverage/lcov.info)
        #[arg(long)]
        lcov: Option<PathBuf>,

        /// JSON history file (default: coverage_history.json)
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { lcov } => {
            cmd_summary(&config.lcov_path(lcov));
            Ok(())
        }
        Commands::Dashboard { history, output } => {
            cmd_dashboard(&config.history_path(history), &config.output_path(output))
        }
        Commands::Record { lcov, history } => {
            cmd_record(&config.lcov_path(lcov), &config.history_path(history))
        }
    }
}

fn summarize(lcov: &Path) -> Summary {
    let summary = Summary::from_path(lcov);
    if let Summary::Unreadable(ref reason) = summary {
        eprintln!(
            "{} could not read {}: {}",
            "warning:".yellow().bold(),
            lcov.display(),
            reason
        );
    }
    summary
}

fn cmd_summary(lcov: &Path) {
    // Plain text: pipelines match on this line
    println!("{}", summarize(lcov));
}

fn cmd_dashboard(history: &Path, output: &Path) -> Result<()> {
    let count = generate_dashboard(history, output)?;

    println!(
        "{} Dashboard generated: {} {}",
        "📊".cyan(),
        output.display().to_string().green(),
        format!("({} entries)", count).dimmed()
    );

    Ok(())
}

fn cmd_record(lcov: &Path, history: &Path) -> Result<()> {
    let summary = summarize(lcov);
    println!("{}", summary);

    let Some(count) = record(&summary, history)? else {
        return Ok(());
    };

    println!(
        "{} Recorded snapshot in {} {}",
        "✓".green(),
        history.display().to_string().green(),
        format!("({} entries)", count).dimmed()
    );

    Ok(())
}
