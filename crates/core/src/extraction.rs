//! Structured extraction from free-form model replies.
//!
//! Extraction never fails. A reply that cannot be read as an [`AnalysisResult`]
//! resolves to the fixed [`fallback_analysis`] so callers always get something
//! renderable.

use symptom_types::{AnalysisResult, Condition, Severity};

use crate::constants::{
    FALLBACK_CONDITION_DESCRIPTION, FALLBACK_CONDITION_LIKELIHOOD, FALLBACK_CONDITION_NAME,
    FALLBACK_DISCLAIMER, FALLBACK_RECOMMENDATIONS, FALLBACK_URGENT_SIGNS,
};

const FENCE: &str = "```";
const CLOSING_FENCE: &str = "\n```";

/// Outcome of extracting an analysis from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The reply contained a well-formed analysis.
    Parsed(AnalysisResult),
    /// The reply was unusable; holds the fixed fallback analysis.
    Fallback(AnalysisResult),
}

impl Extraction {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn analysis(&self) -> &AnalysisResult {
        match self {
            Self::Parsed(a) | Self::Fallback(a) => a,
        }
    }

    pub fn into_analysis(self) -> AnalysisResult {
        match self {
            Self::Parsed(a) | Self::Fallback(a) => a,
        }
    }
}

/// The fixed analysis returned whenever extraction fails.
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        conditions: vec![Condition {
            name: FALLBACK_CONDITION_NAME.into(),
            description: FALLBACK_CONDITION_DESCRIPTION.into(),
            severity: Severity::Medium,
            likelihood: FALLBACK_CONDITION_LIKELIHOOD.into(),
        }],
        recommendations: FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        urgent_signs: FALLBACK_URGENT_SIGNS.iter().map(|s| s.to_string()).collect(),
        disclaimer: FALLBACK_DISCLAIMER.into(),
    }
}

/// Extract an [`AnalysisResult`] from raw assistant text.
///
/// A ```` ```json ```` fenced block is preferred, then a bare ```` ``` ```` block,
/// then the whole text.
pub fn extract_analysis(raw: &str) -> Extraction {
    let candidate = fenced_block(raw, "json")
        .or_else(|| fenced_block(raw, ""))
        .unwrap_or(raw);

    match serde_json::from_str::<AnalysisResult>(candidate.trim()) {
        Ok(analysis) if analysis.is_well_formed() => Extraction::Parsed(analysis),
        Ok(_) => {
            tracing::warn!("model reply has no conditions or disclaimer; using fallback analysis");
            Extraction::Fallback(fallback_analysis())
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse model reply; using fallback analysis");
            Extraction::Fallback(fallback_analysis())
        }
    }
}

/// Inner content of the first fenced block labelled `label` (empty for an
/// unlabelled fence). The opening fence must be followed by a line break and
/// the closing fence must start a line, so backticks inside string values
/// do not end the block.
fn fenced_block<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(FENCE) {
        let open = search_from + offset;
        let after_fence = open + FENCE.len();
        let rest = &text[after_fence..];

        if let Some(body) = rest
            .strip_prefix(label)
            .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
        {
            let body_start = text.len() - body.len();
            let close = if body.starts_with(FENCE) {
                0
            } else {
                body.find(CLOSING_FENCE)?
            };
            return Some(&text[body_start..body_start + close]);
        }

        search_from = after_fence;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{"conditions":[{"name":"A","description":"d","severity":"low","likelihood":"l"}],"recommendations":["r"],"urgentSigns":["u"],"disclaimer":"x"}"#;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            conditions: vec![Condition {
                name: "A".into(),
                description: "d".into(),
                severity: Severity::Low,
                likelihood: "l".into(),
            }],
            recommendations: vec!["r".into()],
            urgent_signs: vec!["u".into()],
            disclaimer: "x".into(),
        }
    }

    #[test]
    fn json_fenced_block_is_returned_unchanged() {
        let raw = format!("```json\n{SAMPLE_JSON}\n```");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }

    #[test]
    fn fenced_block_surrounded_by_prose_is_found() {
        let raw = format!("Here is my analysis:\n\n```json\n{SAMPLE_JSON}\n```\n\nTake care!");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }

    #[test]
    fn plain_fenced_block_is_used_when_no_json_label() {
        let raw = format!("Result:\n```\n{SAMPLE_JSON}\n```");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }

    #[test]
    fn bare_json_without_fence_is_parsed() {
        assert_eq!(extract_analysis(SAMPLE_JSON), Extraction::Parsed(sample()));
    }

    #[test]
    fn unrelated_fence_before_json_fence_does_not_win() {
        let raw = format!("```python\nprint('hi')\n```\n```json\n{SAMPLE_JSON}\n```");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }

    #[test]
    fn non_json_text_yields_fixed_fallback() {
        let extraction = extract_analysis("not json at all");
        assert!(extraction.is_fallback());

        let analysis = extraction.into_analysis();
        assert_eq!(analysis, fallback_analysis());
        assert_eq!(analysis.conditions.len(), 1);
        assert_eq!(analysis.conditions[0].name, "Unable to analyze");
        assert_eq!(analysis.conditions[0].severity, Severity::Medium);
        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.urgent_signs.len(), 4);
        assert!(analysis.disclaimer.contains("educational purposes only"));
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(extract_analysis("???"), extract_analysis("!!!"));
    }

    #[test]
    fn missing_fields_yield_fallback() {
        let raw = r#"{"conditions":[],"recommendations":["r"]}"#;
        assert!(extract_analysis(raw).is_fallback());
    }

    #[test]
    fn unknown_severity_yields_fallback() {
        let raw = SAMPLE_JSON.replace("\"low\"", "\"moderate\"");
        assert!(extract_analysis(&raw).is_fallback());
    }

    #[test]
    fn empty_conditions_yield_fallback() {
        let raw = r#"{"conditions":[],"recommendations":[],"urgentSigns":[],"disclaimer":"x"}"#;
        assert!(extract_analysis(raw).is_fallback());
    }

    #[test]
    fn unclosed_fence_yields_fallback() {
        let raw = format!("```json\n{SAMPLE_JSON}");
        assert!(extract_analysis(&raw).is_fallback());
    }

    #[test]
    fn inline_backticks_inside_fenced_value_do_not_close_block() {
        let json = SAMPLE_JSON.replace("\"d\"", "\"run ```ls``` first\"");
        let raw = format!("```json\n{json}\n```");

        let mut expected = sample();
        expected.conditions[0].description = "run ```ls``` first".into();
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(expected));
    }

    #[test]
    fn crlf_fenced_block_is_parsed() {
        let raw = format!("```json\r\n{SAMPLE_JSON}\r\n```\r\n");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }

    #[test]
    fn empty_fenced_block_yields_fallback() {
        assert!(extract_analysis("```json\n```").is_fallback());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = SAMPLE_JSON.replace("\"disclaimer\"", "\"confidence\":0.4,\"disclaimer\"");
        assert_eq!(extract_analysis(&raw), Extraction::Parsed(sample()));
    }
}
