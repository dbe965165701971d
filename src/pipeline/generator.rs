//! Per-agent plan generation: row extraction, prompt, model call, parsing,
//! date derivation, template fill, and session recording.
//!
//! Agents run strictly sequentially in selection order. One agent's model
//! failure never stops the batch: the plan degrades to blank coaching fields
//! and the next agent proceeds.

use anyhow::Result;
use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use super::payload::{self, PlanOutcome, PlanPayload};
use super::sanitize::clean_text;
use crate::docx::DocxTemplate;
use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::selection::SelectionEntry;
use crate::session::{GeneratedFile, Session};
use crate::table::{Table, MISSED_MARKER, STRENGTH_MARKER};

pub const DEFAULT_LOOKBACK: usize = 5;

const DATE_FORMAT: &str = "%m/%d/%Y";

pub struct PlanGenerator {
    client: Box<dyn LlmClient>,
    template: DocxTemplate,
    lookback: usize,
}

impl PlanGenerator {
    pub fn new(client: Box<dyn LlmClient>, template: DocxTemplate) -> Self {
        Self {
            client,
            template,
            lookback: DEFAULT_LOOKBACK,
        }
    }

    /// Lookback row count, minimum 1.
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback.max(1);
        self
    }

    /// Run the full batch. The session is reset up front and owns the
    /// result list wholesale; the completion flag is set only after every
    /// selected agent has a document.
    pub async fn generate_batch(
        &self,
        table: &Table,
        selections: &[SelectionEntry],
        session: &mut Session,
    ) -> Result<()> {
        session.begin_batch();

        let total = selections.len();
        for (index, entry) in selections.iter().enumerate() {
            info!("Processing {} ({}/{})", entry.agent, index + 1, total);
            let file = self.generate_one(table, entry).await?;
            session.record(file);
        }

        session.finish_batch();
        info!("Batch complete: {} document(s)", total);
        Ok(())
    }

    /// The model round-trip for one agent. Invocation and parse failures
    /// both land on the degraded path; the reason stays attached for tests
    /// and logs but is never surfaced to the operator.
    pub async fn plan_for(&self, table: &Table, agent: &str) -> PlanOutcome {
        let rows = table.agent_rows(agent, self.lookback);
        let missed = table.collect_fields(&rows, MISSED_MARKER);
        let strengths = table.collect_fields(&rows, STRENGTH_MARKER);
        let prompt = prompts::coaching_prompt(&missed, &strengths);

        match self.client.complete(&prompt).await {
            Ok(raw) => match payload::parse_payload(&raw) {
                Ok(parsed) => PlanOutcome::Generated(parsed),
                Err(e) => {
                    warn!("Unparseable model response for {}: {}", agent, e);
                    PlanOutcome::Degraded {
                        reason: e.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!("Model call failed for {}: {}", agent, e);
                PlanOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Produce the finished document for one (agent, date) pair.
    pub async fn generate_one(
        &self,
        table: &Table,
        entry: &SelectionEntry,
    ) -> Result<GeneratedFile> {
        let outcome = self.plan_for(table, &entry.agent).await;
        let payload = outcome.into_payload();
        let replacements = build_replacements(&entry.agent, entry.date, &payload);
        let data = self.template.render(&replacements)?;
        Ok(GeneratedFile {
            name: plan_file_name(&entry.agent),
            data,
        })
    }
}

/// `Coaching Plan - <Agent Name>.docx`
pub fn plan_file_name(agent: &str) -> String {
    format!("Coaching Plan - {}.docx", agent)
}

/// Coaching window end: 21 days after the coaching date.
pub fn end_date(coaching_date: NaiveDate) -> NaiveDate {
    coaching_date + Days::new(21)
}

/// Follow-up checkpoint: 7 days after the coaching date.
pub fn follow_up_date(coaching_date: NaiveDate) -> NaiveDate {
    coaching_date + Days::new(7)
}

/// The full placeholder map for one document. Every value passes through
/// the sanitizer; absent payload fields substitute as empty strings.
pub fn build_replacements(
    agent: &str,
    coaching_date: NaiveDate,
    payload: &PlanPayload,
) -> Vec<(&'static str, String)> {
    let pairs: Vec<(&'static str, String)> = vec![
        ("{{Agent Name}}", agent.to_string()),
        ("{{Date}}", coaching_date.format(DATE_FORMAT).to_string()),
        (
            "{{End Date}}",
            end_date(coaching_date).format(DATE_FORMAT).to_string(),
        ),
        (
            "{{Follow Up Date}}",
            follow_up_date(coaching_date).format(DATE_FORMAT).to_string(),
        ),
        ("{{Primary Focus}}", payload.primary_focus.clone()),
        ("{{Why Matters}}", payload.why_matters.clone()),
        ("{{Action Plan}}", payload.action_plan.clone()),
        ("{{Impact}}", payload.impact_question.clone()),
        ("{{Essential Habit}}", payload.essential_habit.clone()),
        (
            "{{Essential Habit Performed}}",
            payload.essential_habit_performed.clone(),
        ),
        ("{{Issue 1}}", payload.issue_1.clone()),
        ("{{Comment 1}}", payload.comment_1.clone()),
        ("{{Fix 1}}", payload.fix_1.clone()),
        ("{{Issue 2}}", payload.issue_2.clone()),
        ("{{Comment 2}}", payload.comment_2.clone()),
        ("{{Fix 2}}", payload.fix_2.clone()),
        ("{{Issue 3}}", payload.issue_3.clone()),
        ("{{Comment 3}}", payload.comment_3.clone()),
        ("{{Fix 3}}", payload.fix_3.clone()),
        ("{{Root Cause}}", payload.likely_root_cause.clone()),
        ("{{Root Questions}}", payload.root_cause_questions.clone()),
        ("{{Final Thoughts}}", payload.final_thoughts.clone()),
    ];

    pairs
        .into_iter()
        .map(|(token, value)| (token, clean_text(&value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_plan_file_name() {
        assert_eq!(
            plan_file_name("Doe, Jane"),
            "Coaching Plan - Doe, Jane.docx"
        );
    }

    #[test]
    fn test_date_derivation() {
        let d = date("2024-06-01");
        assert_eq!(end_date(d), date("2024-06-22"));
        assert_eq!(follow_up_date(d), date("2024-06-08"));
    }

    #[test]
    fn test_date_derivation_across_year_boundary() {
        let d = date("2024-12-20");
        assert_eq!(end_date(d), date("2025-01-10"));
        assert_eq!(follow_up_date(d), date("2024-12-27"));
    }

    #[test]
    fn test_dates_format_zero_padded() {
        let payload = PlanPayload::default();
        let replacements = build_replacements("X", date("2024-03-05"), &payload);
        let lookup = |token: &str| {
            replacements
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(lookup("{{Date}}"), "03/05/2024");
        assert_eq!(lookup("{{End Date}}"), "03/26/2024");
        assert_eq!(lookup("{{Follow Up Date}}"), "03/12/2024");
    }

    #[test]
    fn test_replacements_cover_all_tokens() {
        let payload = PlanPayload::default();
        let replacements = build_replacements("X", date("2024-06-01"), &payload);
        assert_eq!(replacements.len(), 22);
        for token in [
            "{{Agent Name}}",
            "{{Date}}",
            "{{End Date}}",
            "{{Follow Up Date}}",
            "{{Primary Focus}}",
            "{{Why Matters}}",
            "{{Action Plan}}",
            "{{Impact}}",
            "{{Essential Habit}}",
            "{{Essential Habit Performed}}",
            "{{Issue 1}}",
            "{{Comment 1}}",
            "{{Fix 1}}",
            "{{Issue 2}}",
            "{{Comment 2}}",
            "{{Fix 2}}",
            "{{Issue 3}}",
            "{{Comment 3}}",
            "{{Fix 3}}",
            "{{Root Cause}}",
            "{{Root Questions}}",
            "{{Final Thoughts}}",
        ] {
            assert!(
                replacements.iter().any(|(t, _)| *t == token),
                "missing {token}"
            );
        }
    }

    #[test]
    fn test_replacement_values_are_sanitized() {
        let payload = PlanPayload {
            primary_focus: "**Tone**".to_string(),
            ..PlanPayload::default()
        };
        let replacements = build_replacements("X", date("2024-06-01"), &payload);
        let focus = replacements
            .iter()
            .find(|(t, _)| *t == "{{Primary Focus}}")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(focus, "Tone");
    }
}
