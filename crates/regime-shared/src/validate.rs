//! Grounding validation of generated answers.
//!
//! Checks never edit the answer. They only report issues, which the caller
//! attaches to the unmodified text.
//!
//! # Rules
//!
//! - **Ban list**: case-insensitive substring match against a fixed phrase
//!   catalog; every match is reported, in catalog order
//! - **Direction**: yield curve claims must agree with the sign of the
//!   average spread
//!
//! Substring matching is fragile to paraphrase. Both rules sit behind
//! [`GroundingCheck`] so a structured checker can replace them without
//! touching the pipeline.

use crate::summary::Summary;
use serde::Serialize;
use std::fmt;

/// Class of grounding violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Attributes movements to causes or drivers
    CausalExplanation,
    /// Claims policy intent or stance
    PolicyStance,
    /// Predicts or describes expectations
    ForwardLooking,
    /// Yield curve description disagrees with the summary
    DirectionalInconsistency,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CausalExplanation => "causal explanation",
            Self::PolicyStance => "policy stance or intent",
            Self::ForwardLooking => "forward-looking claim",
            Self::DirectionalInconsistency => "directional inconsistency",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub category: IssueCategory,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A single grounding rule.
pub trait GroundingCheck: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Issues found in `answer`, in a deterministic order
    fn check(&self, answer: &str, summary: &Summary) -> Vec<ValidationIssue>;
}

/// Forbidden phrases, grouped by category. Order is the reporting order.
pub const BANNED_PHRASES: &[(&str, IssueCategory)] = &[
    ("driven by", IssueCategory::CausalExplanation),
    ("caused by", IssueCategory::CausalExplanation),
    ("due to", IssueCategory::CausalExplanation),
    ("result of", IssueCategory::CausalExplanation),
    ("accommodative", IssueCategory::PolicyStance),
    ("restrictive", IssueCategory::PolicyStance),
    ("tightening", IssueCategory::PolicyStance),
    ("easing", IssueCategory::PolicyStance),
    ("policy stance", IssueCategory::PolicyStance),
    ("expects", IssueCategory::ForwardLooking),
    ("expectations", IssueCategory::ForwardLooking),
    ("anticipated", IssueCategory::ForwardLooking),
    ("indicative of", IssueCategory::ForwardLooking),
    ("signals", IssueCategory::ForwardLooking),
    ("suggests that rates will", IssueCategory::ForwardLooking),
    ("future interest rate", IssueCategory::ForwardLooking),
];

/// Case-insensitive ban list over [`BANNED_PHRASES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BannedPhrases;

impl GroundingCheck for BannedPhrases {
    fn name(&self) -> &'static str {
        "banned_phrases"
    }

    fn check(&self, answer: &str, _summary: &Summary) -> Vec<ValidationIssue> {
        let lowered = answer.to_lowercase();
        BANNED_PHRASES
            .iter()
            .filter(|(phrase, _)| lowered.contains(phrase))
            .map(|(phrase, category)| {
                ValidationIssue::new(*category, format!("Introduced {}: '{}'", category, phrase))
            })
            .collect()
    }
}

const INVERTED_TERMS: &[&str] = &["inverted", "negative spread"];
const UPWARD_TERMS: &[&str] = &["positive", "upward sloping"];

/// Yield curve wording must agree with the sign of the average spread.
///
/// A zero spread is labelled upward sloping by the summary, so calling it
/// inverted contradicts a provided label and is flagged; calling it upward
/// sloping is not.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveDirection;

impl GroundingCheck for CurveDirection {
    fn name(&self) -> &'static str {
        "curve_direction"
    }

    fn check(&self, answer: &str, summary: &Summary) -> Vec<ValidationIssue> {
        let lowered = answer.to_lowercase();
        let spread = summary.avg_yield_spread();

        let (terms, subject, claim) = if spread > 0.0 {
            (INVERTED_TERMS, "Positive yield spread", "inverted/negative")
        } else if spread < 0.0 {
            (UPWARD_TERMS, "Negative yield spread", "positive/upward sloping")
        } else {
            (INVERTED_TERMS, "Flat yield spread", "inverted/negative")
        };

        let found: Vec<&str> = terms
            .iter()
            .copied()
            .filter(|t| lowered.contains(t))
            .collect();
        if found.is_empty() {
            return Vec::new();
        }

        vec![ValidationIssue::new(
            IssueCategory::DirectionalInconsistency,
            format!(
                "{} ({}%) described as {}: {}",
                subject,
                spread,
                claim,
                found
                    .iter()
                    .map(|t| format!("'{}'", t))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )]
    }
}

/// Ordered set of grounding checks.
pub struct Validator {
    checks: Vec<Box<dyn GroundingCheck>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::standard()
    }
}

impl Validator {
    /// Ban list first, then curve direction
    pub fn standard() -> Self {
        Self::empty()
            .with_check(BannedPhrases)
            .with_check(CurveDirection)
    }

    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check(mut self, check: impl GroundingCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check in order. Empty means the answer is grounded.
    pub fn validate(&self, answer: &str, summary: &Summary) -> Vec<ValidationIssue> {
        self.checks
            .iter()
            .flat_map(|c| c.check(answer, summary))
            .collect()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("checks", &self.check_names())
            .finish()
    }
}
