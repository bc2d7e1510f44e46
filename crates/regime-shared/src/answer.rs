//! Final output shape.
//!
//! A grounded answer is passed through untouched. A flagged answer keeps the
//! same untouched text next to the issue list, so a reviewer always sees
//! both.

use crate::validate::ValidationIssue;
use serde::Serialize;
use std::fmt;

/// Result of one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FinalAnswer {
    Grounded {
        answer: String,
    },
    Flagged {
        issues: Vec<ValidationIssue>,
        answer: String,
    },
}

impl FinalAnswer {
    /// Pair an answer with its issues; no issues means grounded.
    pub fn from_validation(answer: String, issues: Vec<ValidationIssue>) -> Self {
        if issues.is_empty() {
            Self::Grounded { answer }
        } else {
            Self::Flagged { issues, answer }
        }
    }

    /// The generated text, never modified
    pub fn answer(&self) -> &str {
        match self {
            Self::Grounded { answer } | Self::Flagged { answer, .. } => answer,
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Grounded { .. } => &[],
            Self::Flagged { issues, .. } => issues,
        }
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded { .. })
    }
}

impl fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grounded { answer } => f.write_str(answer),
            Self::Flagged { issues, answer } => {
                writeln!(f, "The generated response violated grounding rules:")?;
                writeln!(f)?;
                for issue in issues {
                    writeln!(f, "- {}", issue)?;
                }
                writeln!(f)?;
                writeln!(f, "Unmodified answer text:")?;
                writeln!(f)?;
                f.write_str(answer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::IssueCategory;

    #[test]
    fn test_grounded_renders_answer_verbatim() {
        let a = FinalAnswer::from_validation("  Rates were low.\n".to_string(), vec![]);
        assert!(a.is_grounded());
        assert_eq!(a.to_string(), "  Rates were low.\n");
    }

    #[test]
    fn test_flagged_report_layout() {
        let issues = vec![ValidationIssue::new(
            IssueCategory::PolicyStance,
            "Introduced policy stance or intent: 'accommodative'",
        )];
        let a = FinalAnswer::from_validation("Policy was accommodative.".to_string(), issues);
        assert!(!a.is_grounded());
        assert_eq!(
            a.to_string(),
            "The generated response violated grounding rules:\n\n\
             - Introduced policy stance or intent: 'accommodative'\n\n\
             Unmodified answer text:\n\n\
             Policy was accommodative."
        );
        assert_eq!(a.answer(), "Policy was accommodative.");
        assert_eq!(a.issues().len(), 1);
    }
}
