//! # Symptom Types
//!
//! Domain data model shared by the analysis core, the HTTP front ends and the CLI.
//!
//! - [`SymptomText`]: validated, trimmed, non-empty symptom description
//! - [`Condition`] / [`Severity`]: one possible condition suggested by the model
//! - [`AnalysisResult`]: the structured analysis returned to callers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input was absent, or empty/whitespace-only after trimming.
    #[error("Symptoms are required")]
    Empty,
}

/// A symptom description that is guaranteed to contain non-whitespace content.
///
/// The input is trimmed of leading and trailing whitespace during construction,
/// so the stored value is exactly what is forwarded to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomText(String);

impl SymptomText {
    /// Creates a new `SymptomText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SymptomText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymptomText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SymptomText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SymptomText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SymptomText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// How serious a suggested condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A possible condition matching the described symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub likelihood: String,
}

/// Structured educational analysis of a symptom description.
///
/// A well-formed result always has at least one condition and a non-empty
/// disclaimer; see [`AnalysisResult::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub conditions: Vec<Condition>,
    pub recommendations: Vec<String>,
    pub urgent_signs: Vec<String>,
    pub disclaimer: String,
}

impl AnalysisResult {
    /// True when the result can be rendered as-is: at least one condition and a
    /// disclaimer with visible content.
    pub fn is_well_formed(&self) -> bool {
        !self.conditions.is_empty() && !self.disclaimer.trim().is_empty()
    }
}
