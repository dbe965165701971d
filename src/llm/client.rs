use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Canned coaching payload, fenced like real model output so the
        // fence-stripping path is exercised on dry runs.
        if prompt.contains("expert QA Coach") {
            Ok(r#"```json
{
  "primary_focus": "Resolution Accuracy",
  "why_matters": "Callers who leave without a full fix call back, and repeat calls erode trust.",
  "action_plan": "Before closing, restate the caller's issue and confirm each part is resolved. Practice on 5 calls this week.",
  "impact_question": "What would change for your AF score if every caller heard their issue confirmed back? Closing the loop lifts resolution and caller confidence.",
  "essential_habit": "Be Present - Demonstrate Understanding",
  "essential_habit_performed": "Establish Credibility - Demonstrate common courtesy",
  "likely_root_cause": "Skill gap in structuring the close of a call.",
  "root_cause_questions": "What do you check before ending a call? What makes a close feel rushed? Where could a recap fit?",
  "final_thoughts": "Your courtesy already lands well. Add a structured close and the numbers will follow.",
  "issue_1": "Whenever the caller lists several problems, incomplete resolution shows by only the first problem being addressed",
  "comment_1": "Partial fixes convert one contact into several and teach callers to repeat themselves.",
  "fix_1": "Note each problem as it is raised and work the list before closing.",
  "issue_2": "Whenever the caller is in a hurry, lack of urgency shows by reading the full script slowly",
  "comment_2": "Pacing that ignores the caller's cues reads as indifference even when the content is right.",
  "fix_2": "Match the caller's pace and trim optional script lines.",
  "issue_3": "Whenever the caller pushes back, defensiveness shows by talking over the objection",
  "comment_3": "Interrupting an objection removes the chance to learn what the caller actually needs.",
  "fix_3": "Let the objection finish, then answer the specific concern."
}
```"#
                .to_string())
        } else {
            Ok(r#"{"status": "mock"}"#.to_string())
        }
    }
}
