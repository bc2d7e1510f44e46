//! Question answering pipeline.
//!
//! Stages run strictly in sequence with no skipping:
//! parse → select → summarize → prompt → complete → extract → validate.
//! The model is never called for an empty selection, and its answer is
//! never edited. Violations are returned as data next to the untouched text.

use crate::error::RegimeError;
use crate::llm::CompletionModel;
use crate::store::FeatureStore;
use regime_shared::{
    build_prompt, extract_answer_with_source, extract_years, filter, summarize, Extraction,
    FinalAnswer, Summary, Validator, YearRange,
};
use tracing::{debug, info, warn};

/// Everything known about a question before the model runs.
#[derive(Debug, Clone)]
pub struct PreparedQuestion {
    /// Years parsed from the question; `None` means the full series
    pub range: Option<YearRange>,
    /// Rows in the selected slice
    pub rows: usize,
    pub summary: Summary,
    pub prompt: String,
}

/// Parse, select, summarize and build the prompt. No inference.
pub fn prepare(store: &FeatureStore, question: &str) -> Result<PreparedQuestion, RegimeError> {
    let range = extract_years(question);
    let slice = filter(store.records(), range);
    info!(
        "Selected {} rows for {}",
        slice.len(),
        range.map_or_else(|| "full series".to_string(), |r| r.to_string())
    );

    let summary = summarize(&slice).map_err(|e| RegimeError::from_summary(e, range))?;
    let prompt = build_prompt(question, &summary);
    debug!("Built prompt ({} bytes)", prompt.len());

    Ok(PreparedQuestion {
        range,
        rows: slice.len(),
        summary,
        prompt,
    })
}

/// Sequences the pipeline over a borrowed store.
pub struct Orchestrator<'a> {
    store: &'a FeatureStore,
    model: Box<dyn CompletionModel + 'a>,
    validator: Validator,
}

impl<'a> Orchestrator<'a> {
    pub fn new(store: &'a FeatureStore, model: impl CompletionModel + 'a) -> Self {
        Self {
            store,
            model: Box::new(model),
            validator: Validator::standard(),
        }
    }

    /// Replace the standard checks
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn prepare(&self, question: &str) -> Result<PreparedQuestion, RegimeError> {
        prepare(self.store, question)
    }

    /// Answer a question, flagging any grounding violations.
    pub async fn answer(&self, question: &str) -> Result<FinalAnswer, RegimeError> {
        let prepared = self.prepare(question)?;

        let raw = self.model.complete(&prepared.prompt).await?;
        let (answer, source) = extract_answer_with_source(&raw);
        if source == Extraction::WholeOutput {
            warn!("Answer marker missing from model output; using whole output");
        }

        let issues = self.validator.validate(&answer, &prepared.summary);
        if issues.is_empty() {
            info!("Answer grounded");
        } else {
            warn!("Answer flagged with {} grounding issue(s)", issues.len());
        }

        Ok(FinalAnswer::from_validation(answer, issues))
    }
}
