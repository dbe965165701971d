//! The coaching payload returned by the model, and the outcome type that
//! records whether a plan was generated or degraded to blanks.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::sanitize::coerce_text;

/// Parsed model response. Every field is optional; a missing key substitutes
/// as an empty string downstream. Fields that arrive as JSON arrays are
/// joined with newlines at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlanPayload {
    #[serde(deserialize_with = "text_field")]
    pub primary_focus: String,
    #[serde(deserialize_with = "text_field")]
    pub why_matters: String,
    #[serde(deserialize_with = "text_field")]
    pub action_plan: String,
    #[serde(deserialize_with = "text_field")]
    pub impact_question: String,
    #[serde(deserialize_with = "text_field")]
    pub essential_habit: String,
    #[serde(deserialize_with = "text_field")]
    pub essential_habit_performed: String,
    #[serde(deserialize_with = "text_field")]
    pub likely_root_cause: String,
    #[serde(deserialize_with = "text_field")]
    pub root_cause_questions: String,
    #[serde(deserialize_with = "text_field")]
    pub final_thoughts: String,
    #[serde(deserialize_with = "text_field")]
    pub issue_1: String,
    #[serde(deserialize_with = "text_field")]
    pub comment_1: String,
    #[serde(deserialize_with = "text_field")]
    pub fix_1: String,
    #[serde(deserialize_with = "text_field")]
    pub issue_2: String,
    #[serde(deserialize_with = "text_field")]
    pub comment_2: String,
    #[serde(deserialize_with = "text_field")]
    pub fix_2: String,
    #[serde(deserialize_with = "text_field")]
    pub issue_3: String,
    #[serde(deserialize_with = "text_field")]
    pub comment_3: String,
    #[serde(deserialize_with = "text_field")]
    pub fix_3: String,
}

fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(&value))
}

/// Result of one agent's model round-trip. Invocation or parse failure
/// degrades to an empty payload; the batch continues either way and the
/// failure reason stays assertable.
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    Generated(PlanPayload),
    Degraded { reason: String },
}

impl PlanOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The payload to fill the template with: the parsed one, or all-empty
    /// fields on the degraded path.
    pub fn into_payload(self) -> PlanPayload {
        match self {
            Self::Generated(payload) => payload,
            Self::Degraded { .. } => PlanPayload::default(),
        }
    }
}

/// Remove every code-fence marker (```json and bare ```) from the raw
/// response and trim before parsing.
pub fn strip_json_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a raw model response into a payload.
pub fn parse_payload(raw: &str) -> Result<PlanPayload> {
    let cleaned = strip_json_fences(raw);
    serde_json::from_str(&cleaned).context("model response is not valid JSON")
}
