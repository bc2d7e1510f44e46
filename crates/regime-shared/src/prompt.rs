//! Grounded completion prompt.
//!
//! The prompt is a pure function of (question, summary). No clock, no
//! randomness: the same inputs always render the same bytes, which keeps
//! runs reproducible and lets the extractor find the marker reliably.

use crate::summary::Summary;

/// Literal separating the instructions from the expected completion.
pub const ANSWER_MARKER: &str = "Answer:";

/// Hard constraints shown before the data. Must never contain [`ANSWER_MARKER`].
const RULES: &str = "\
You are an economic analyst producing a factual interpretation of a data summary.

STRICT RULES:
- USE ONLY the information provided in the data summary below.
- Do NOT infer causes or drivers of any movement.
- Do NOT introduce external events, sectors, or historical narratives.
- Do NOT infer policy intent, policy stance, or market expectations.
- Do NOT use stance terms such as \"accommodative\" or \"restrictive\".
- Do NOT make predictions or describe what rates will do.
- Keep every statement numerically consistent with the data.
- Do NOT contradict the qualitative labels provided (real rate sign, yield curve shape).
- USE the metric definitions exactly as given; do not restate or redefine them.
- When describing interest rates, use only numeric or directional language
  (for example \"positive\", \"negative\", \"above inflation\", \"below inflation\").
- If the data is insufficient to support a statement, say so explicitly.";

/// Render the prompt for a question grounded in `summary`.
///
/// Averages always carry two decimals, so 3.0 renders as `3.00%`.
pub fn build_prompt(question: &str, summary: &Summary) -> String {
    let mut prompt = String::with_capacity(RULES.len() + question.len() + 768);
    prompt.push_str(RULES);

    prompt.push_str(&format!(
        "\n\nPeriod: {} to {}\n",
        summary.start_date(),
        summary.end_date()
    ));

    prompt.push_str("\nData summary:\n");
    prompt.push_str(&format!(
        "- Average real policy rate: {:.2}%\n",
        summary.avg_real_policy_rate()
    ));
    prompt.push_str(&format!(
        "- Average inflation (YoY): {:.2}%\n",
        summary.avg_inflation()
    ));
    prompt.push_str(&format!(
        "- Average yield spread (10-year yield minus nominal policy rate): {:.2}%\n",
        summary.avg_yield_spread()
    ));
    prompt.push_str(&format!(
        "- Real policy rate sign: {}\n",
        summary.real_rate_sign()
    ));
    prompt.push_str(&format!(
        "- Yield curve shape: {}\n",
        summary.yield_curve_shape()
    ));
    prompt.push_str(&format!(
        "- Dominant macro regime (clustered): {}\n",
        summary.dominant_regime()
    ));
    prompt.push_str("  (Regime labels are opaque cluster ids with no semantic meaning.)\n");

    prompt.push_str(
        "\nTask:\nDescribe the macroeconomic environment during this period in clear, \
         professional language. Avoid speculation, prediction, and external context.\n",
    );

    prompt.push_str("\nQuestion:\n");
    prompt.push_str(question);
    prompt.push_str("\n\n");
    prompt.push_str(ANSWER_MARKER);

    prompt
}
