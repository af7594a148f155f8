//! Request orchestration.
//!
//! One analysis request moves through an explicit sequence of states:
//!
//! ```text
//! Received -> Validated -> Completed -> Extracted -> Recorded -> Finished(Done)
//!     |           |
//!     |           +-> Finished(UpstreamFailed)
//!     +-> Finished(Rejected | Faulted)
//! ```
//!
//! [`SymptomAnalyzer::advance`] performs exactly one transition; [`SymptomAnalyzer::run`]
//! drives a request to its terminal [`AnalysisOutcome`]. Nothing is shared between
//! requests and there is no internal retry of the completion call.

use symptom_types::{AnalysisResult, SymptomText, TextError};

use crate::audit::{AuditRecord, AuditRecorder, AuditStore, PostgrestAuditStore};
use crate::completion::{CompletionClient, GatewayClient};
use crate::config::CoreConfig;
use crate::extraction::{extract_analysis, Extraction};
use crate::prompt::build_prompt;
use crate::validation::validate_request_body;
use crate::{CoreError, CoreResult, UpstreamError};

/// Terminal result of one analysis request.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Analysis produced, either parsed from the model or the fallback.
    Done(AnalysisResult),
    /// The request carried no usable symptom text.
    Rejected(TextError),
    /// The completion service failed.
    UpstreamFailed(UpstreamError),
    /// Any other fault before extraction.
    Faulted(String),
}

/// Lifecycle state of one analysis request.
#[derive(Debug)]
pub enum AnalysisState {
    Received { body: Vec<u8> },
    Validated { symptoms: SymptomText },
    Completed { symptoms: SymptomText, reply: String },
    Extracted { symptoms: SymptomText, extraction: Extraction },
    Recorded { analysis: AnalysisResult },
    Finished(AnalysisOutcome),
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Received { .. } => "received",
            Self::Validated { .. } => "validated",
            Self::Completed { .. } => "completed",
            Self::Extracted { .. } => "extracted",
            Self::Recorded { .. } => "recorded",
            Self::Finished(_) => "finished",
        }
    }
}

/// Orchestrates validation, completion, extraction and auditing for a request.
pub struct SymptomAnalyzer {
    completion: Box<dyn CompletionClient>,
    recorder: AuditRecorder,
}

impl SymptomAnalyzer {
    pub fn new(completion: Box<dyn CompletionClient>, recorder: AuditRecorder) -> Self {
        Self {
            completion,
            recorder,
        }
    }

    /// Build an analyzer wired to the real completion gateway and audit store.
    pub fn from_config(config: &CoreConfig) -> CoreResult<Self> {
        Self::with_store(
            config,
            Box::new(PostgrestAuditStore::new(config.audit())?),
        )
    }

    /// Build an analyzer wired to the real completion gateway and a caller-chosen store.
    pub fn with_store(config: &CoreConfig, store: Box<dyn AuditStore>) -> CoreResult<Self> {
        let completion = GatewayClient::new(config.completion())?;
        Ok(Self::new(
            Box::new(completion),
            AuditRecorder::new(store, config.audit().max_attempts())
                .with_timeout(config.audit().timeout()),
        ))
    }

    /// Run a raw JSON request body through to a terminal outcome.
    pub async fn run(&self, body: &[u8]) -> AnalysisOutcome {
        self.drive(AnalysisState::Received {
            body: body.to_vec(),
        })
        .await
    }

    /// Run already-extracted symptom text through to a terminal outcome.
    pub async fn analyze(&self, symptoms: &str) -> AnalysisOutcome {
        match SymptomText::new(symptoms) {
            Ok(symptoms) => self.drive(AnalysisState::Validated { symptoms }).await,
            Err(e) => AnalysisOutcome::Rejected(e),
        }
    }

    async fn drive(&self, mut state: AnalysisState) -> AnalysisOutcome {
        loop {
            state = self.advance(state).await;
            if let AnalysisState::Finished(outcome) = state {
                return outcome;
            }
        }
    }

    /// Perform a single state transition. Terminal states are returned unchanged.
    pub async fn advance(&self, state: AnalysisState) -> AnalysisState {
        let from = state.name();
        let next = match state {
            AnalysisState::Received { body } => match validate_request_body(&body) {
                Ok(symptoms) => {
                    tracing::info!(len = symptoms.as_str().len(), "analyzing symptoms");
                    tracing::debug!(symptoms = %symptoms, "symptom text");
                    AnalysisState::Validated { symptoms }
                }
                Err(CoreError::Validation(e)) => {
                    tracing::info!("rejected request without symptoms");
                    AnalysisState::Finished(AnalysisOutcome::Rejected(e))
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to read analysis request");
                    AnalysisState::Finished(AnalysisOutcome::Faulted(e.to_string()))
                }
            },
            AnalysisState::Validated { symptoms } => {
                let prompt = build_prompt(&symptoms);
                match self.completion.complete(&prompt).await {
                    Ok(reply) => {
                        tracing::debug!(reply = %reply, "model reply");
                        AnalysisState::Completed { symptoms, reply }
                    }
                    Err(e) => {
                        tracing::error!(status = ?e.status(), error = %e, "completion service error");
                        AnalysisState::Finished(AnalysisOutcome::UpstreamFailed(e))
                    }
                }
            }
            AnalysisState::Completed { symptoms, reply } => AnalysisState::Extracted {
                symptoms,
                extraction: extract_analysis(&reply),
            },
            AnalysisState::Extracted {
                symptoms,
                extraction,
            } => {
                let analysis = extraction.into_analysis();
                self.recorder
                    .record(AuditRecord {
                        symptoms: symptoms.into_inner(),
                        analysis: analysis.clone(),
                        user_id: None,
                    })
                    .await;
                AnalysisState::Recorded { analysis }
            }
            AnalysisState::Recorded { analysis } => {
                AnalysisState::Finished(AnalysisOutcome::Done(analysis))
            }
            finished @ AnalysisState::Finished(_) => finished,
        };
        tracing::trace!(from, to = next.name(), "analysis transition");
        next
    }
}
