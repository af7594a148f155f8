//! Input validation for analysis requests.
//!
//! The request body is untrusted. Validation extracts the `symptoms` field and
//! guarantees the value handed to the rest of the pipeline is non-empty after
//! trimming.

use crate::{CoreError, CoreResult};
use symptom_types::{SymptomText, TextError};

/// Extracts and validates `symptoms` from a raw JSON request body.
///
/// # Errors
///
/// - `CoreError::Validation` if `symptoms` is absent, not a string, or blank.
/// - `CoreError::Internal` if the body is not JSON at all. This is treated as an
///   unexpected fault rather than a caller error.
pub fn validate_request_body(body: &[u8]) -> CoreResult<SymptomText> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::Internal(format!("invalid JSON request body: {e}")))?;

    validate_symptoms(value.get("symptoms"))
}

/// Validates an already-decoded `symptoms` value.
pub fn validate_symptoms(value: Option<&serde_json::Value>) -> CoreResult<SymptomText> {
    let text = value
        .and_then(serde_json::Value::as_str)
        .ok_or(TextError::Empty)?;

    Ok(SymptomText::new(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_symptoms() {
        let text = validate_request_body(br#"{"symptoms":"  sore throat  "}"#).expect("valid");
        assert_eq!(text.as_str(), "sore throat");
    }

    #[test]
    fn rejects_empty_and_whitespace_symptoms() {
        for body in [
            br#"{"symptoms":""}"#.as_slice(),
            br#"{"symptoms":"   "}"#.as_slice(),
        ] {
            let err = validate_request_body(body).expect_err("should reject");
            assert!(matches!(err, CoreError::Validation(TextError::Empty)));
        }
    }

    #[test]
    fn rejects_missing_null_or_non_string_symptoms() {
        for body in [
            br#"{}"#.as_slice(),
            br#"{"symptoms":null}"#.as_slice(),
            br#"{"symptoms":42}"#.as_slice(),
            br#"["symptoms"]"#.as_slice(),
        ] {
            let err = validate_request_body(body).expect_err("should reject");
            assert!(matches!(err, CoreError::Validation(TextError::Empty)));
        }
    }

    #[test]
    fn malformed_json_is_an_internal_fault() {
        let err = validate_request_body(b"symptoms=headache").expect_err("should fail");
        assert!(matches!(err, CoreError::Internal(msg) if msg.contains("invalid JSON")));
    }
}
