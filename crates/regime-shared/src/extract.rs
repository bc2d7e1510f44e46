//! Completion extraction.
//!
//! Completion executables echo the prompt before the generated text. The
//! first marker separates the two.
//!
//! Known limitation: the question is echoed before the final marker, so a
//! question that itself contains `Answer:` splits early and the rest of the
//! echoed question leaks into the extracted text.

use crate::prompt::ANSWER_MARKER;

/// Where the extracted answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Text following the first marker
    AfterMarker,
    /// Marker missing; whole output used, prompt echo may leak through
    WholeOutput,
}

/// Return the model's completion with the echoed prompt stripped.
pub fn extract_answer(raw: &str) -> String {
    extract_answer_with_source(raw).0
}

/// Like [`extract_answer`], also reporting which path produced the text.
pub fn extract_answer_with_source(raw: &str) -> (String, Extraction) {
    match raw.split_once(ANSWER_MARKER) {
        Some((_, rest)) => (rest.trim().to_string(), Extraction::AfterMarker),
        None => (raw.trim().to_string(), Extraction::WholeOutput),
    }
}
