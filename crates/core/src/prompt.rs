//! Prompt construction for the completion service.

use serde::Serialize;
use symptom_types::SymptomText;

const SYSTEM_INSTRUCTION: &str = r#"You are a medical information assistant. Based on symptoms provided, suggest possible conditions and next steps.

CRITICAL: This is for educational purposes only. Always include appropriate disclaimers.

For each analysis, provide:
1. 3-5 possible conditions (with severity: low/medium/high)
2. Recommended next steps
3. Warning signs that need immediate attention
4. Educational disclaimer

Format your response as JSON with this structure:
{
  "conditions": [
    {
      "name": "Condition name",
      "description": "Brief description",
      "severity": "low|medium|high",
      "likelihood": "Common match for these symptoms"
    }
  ],
  "recommendations": [
    "Recommendation 1",
    "Recommendation 2"
  ],
  "urgentSigns": [
    "Sign 1 that requires immediate attention",
    "Sign 2"
  ],
  "disclaimer": "Important medical disclaimer text"
}"#;

const USER_PREFIX: &str =
    "Based on these symptoms, provide possible conditions and recommendations: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The two-message prompt sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: Message,
    pub user: Message,
}

impl Prompt {
    /// Messages in the order the completion API expects them.
    pub fn messages(&self) -> [&Message; 2] {
        [&self.system, &self.user]
    }
}

/// Builds the prompt for a validated symptom description. Pure and deterministic.
pub fn build_prompt(symptoms: &SymptomText) -> Prompt {
    Prompt {
        system: Message {
            role: Role::System,
            content: SYSTEM_INSTRUCTION.to_string(),
        },
        user: Message {
            role: Role::User,
            content: format!("{USER_PREFIX}{symptoms}"),
        },
    }
}
