//! Command implementations for regimectl.

use anyhow::{bail, Result};
use regime_common::{prepare, Config, FeatureStore, LlamaCli, Orchestrator};
use std::io::{self, BufRead, Write};
use tracing::{info_span, Instrument};

/// Read a question from stdin and answer it.
pub async fn ask(config: &Config, store: &FeatureStore) -> Result<()> {
    eprint!("Ask a macroeconomic question:\n> ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let question = line.trim();
    if question.is_empty() {
        bail!("No question provided");
    }

    let orchestrator = Orchestrator::new(store, LlamaCli::new(config.llm.clone()));
    let request_id = uuid::Uuid::new_v4();
    let answer = orchestrator
        .answer(question)
        .instrument(info_span!("question", id = %request_id))
        .await?;

    println!("\n--- Answer ---\n");
    println!("{}", answer);
    println!("\n---------------\n");
    Ok(())
}

pub fn inspect(store: &FeatureStore) -> Result<()> {
    print!("{}", store.overview());
    Ok(())
}

/// Grounding summary as JSON, no inference.
pub fn summary(store: &FeatureStore, question: &str) -> Result<()> {
    let prepared = prepare(store, question)?;
    let out = serde_json::json!({
        "range": prepared.range,
        "rows": prepared.rows,
        "summary": prepared.summary,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Prompt text exactly as the model would receive it.
pub fn prompt(store: &FeatureStore, question: &str) -> Result<()> {
    let prepared = prepare(store, question)?;
    println!("{}", prepared.prompt);
    Ok(())
}
