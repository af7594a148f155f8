//! Constants used throughout the symptom analysis core.
//!
//! Defaults for configuration values, the fixed user-facing messages and the
//! content of the fallback analysis live here so that every front end agrees.

/// Default chat-completion endpoint when no explicit URL is configured.
pub const DEFAULT_COMPLETION_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Default model identifier sent with every completion request.
pub const DEFAULT_COMPLETION_MODEL: &str = "google/gemini-2.5-flash";

/// Default upper bound on a single completion call, in seconds.
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Default table receiving audit records.
pub const DEFAULT_AUDIT_TABLE: &str = "symptom_queries";

/// Default number of attempts for a single audit insert (1 = no retry).
pub const DEFAULT_AUDIT_MAX_ATTEMPTS: u32 = 1;

/// Default upper bound on a single audit insert, in seconds.
pub const DEFAULT_AUDIT_TIMEOUT_SECS: u64 = 10;

/// Response message when the completion service is rate limiting us.
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Response message when the completion service requires payment.
pub const PAYMENT_REQUIRED_MESSAGE: &str =
    "Service temporarily unavailable. Please try again later.";

/// Response message for any other upstream failure. Upstream bodies are never echoed.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to analyze symptoms";

/// Name of the single condition in the fallback analysis.
pub const FALLBACK_CONDITION_NAME: &str = "Unable to analyze";

pub(crate) const FALLBACK_CONDITION_DESCRIPTION: &str =
    "The system encountered an issue analyzing your symptoms.";

pub(crate) const FALLBACK_CONDITION_LIKELIHOOD: &str = "Please try rephrasing your symptoms";

pub(crate) const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Consult with a healthcare provider for proper evaluation",
    "Keep track of your symptoms and their duration",
];

pub(crate) const FALLBACK_URGENT_SIGNS: [&str; 4] = [
    "Severe or worsening symptoms",
    "Difficulty breathing",
    "Chest pain",
    "Loss of consciousness",
];

pub(crate) const FALLBACK_DISCLAIMER: &str = "This tool is for educational purposes only and does not provide medical advice. Always consult qualified healthcare professionals for proper diagnosis and treatment.";
