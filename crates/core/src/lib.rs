//! # Symptom Core
//!
//! Core orchestration for the symptom analysis service.
//!
//! This crate owns the single request/response cycle:
//! - Input validation of the untrusted symptom text
//! - Prompt construction for the completion service
//! - The outbound chat-completion call and its status mapping
//! - Best-effort extraction of a structured analysis, with a fixed fallback
//! - Best-effort audit recording
//!
//! **No API concerns**: HTTP routing, CORS and status-code mapping belong in `api-rest`
//! and `api-shared`.

pub mod analysis;
pub mod audit;
pub mod completion;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod prompt;
pub mod validation;

pub use analysis::{AnalysisOutcome, AnalysisState, SymptomAnalyzer};
pub use audit::{AuditRecord, AuditRecorder, AuditStore, NoopAuditStore, PostgrestAuditStore};
pub use completion::{CompletionClient, GatewayClient};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult, PersistenceError, UpstreamError};
pub use extraction::{extract_analysis, fallback_analysis, Extraction};
pub use prompt::{build_prompt, Prompt};

pub use symptom_types::{AnalysisResult, Condition, Severity, SymptomText, TextError};
