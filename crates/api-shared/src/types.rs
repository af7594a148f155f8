//! JSON bodies exchanged with the presentation layer.

use serde::{Deserialize, Serialize};
use symptom_types::AnalysisResult;
use utoipa::ToSchema;

/// Request body for an analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Free-text description of the symptoms.
    pub symptoms: String,
}

/// Successful analysis response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    pub analysis: AnalysisResult,
}

/// Error response: a single human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
