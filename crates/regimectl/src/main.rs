//! regimectl - grounded answers to macroeconomic questions.
//!
//! With no subcommand, reads one question from stdin and prints either the
//! answer or the grounding violation report.

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regime_common::{Config, FeatureStore};

#[derive(Parser)]
#[command(name = "regimectl")]
#[command(about = "Grounded answers to macroeconomic questions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show row coverage and regime counts of the feature table
    Inspect,

    /// Print the grounding summary for a question without running the model
    Summary {
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Print the exact prompt a question would send to the model
    Prompt {
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    logging::init(&config.log);

    let store = FeatureStore::load(&config.data.features_path).with_context(|| {
        format!(
            "Feature table unavailable (set data.features_path in {})",
            regime_common::config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string())
        )
    })?;

    match cli.command {
        None => commands::ask(&config, &store).await,
        Some(Commands::Inspect) => commands::inspect(&store),
        Some(Commands::Summary { question }) => commands::summary(&store, &question.join(" ")),
        Some(Commands::Prompt { question }) => commands::prompt(&store, &question.join(" ")),
    }
}
