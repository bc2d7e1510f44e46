//! Shared types and pure pipeline stages for regime.
//!
//! No IO, no async. Everything here is deterministic given its inputs:
//! question → years → selection → summary → prompt, and completion →
//! answer → issues → final answer.

pub mod answer;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod question;
pub mod record;
pub mod selector;
pub mod summary;
pub mod validate;

pub use answer::FinalAnswer;
pub use error::SummaryError;
pub use extract::{extract_answer, extract_answer_with_source, Extraction};
pub use prompt::{build_prompt, ANSWER_MARKER};
pub use question::extract_years;
pub use record::{FeatureRecord, YearRange};
pub use selector::filter;
pub use summary::{summarize, RealRateSign, Summary, YieldCurveShape};
pub use validate::{
    BannedPhrases, CurveDirection, GroundingCheck, IssueCategory, ValidationIssue, Validator,
};
