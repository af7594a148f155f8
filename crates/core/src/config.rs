//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! [`crate::SymptomAnalyzer`]. Request handling never reads process environment, so
//! tests can build a `CoreConfig` directly and substitute fake collaborators.

use crate::constants::{
    DEFAULT_AUDIT_MAX_ATTEMPTS, DEFAULT_AUDIT_TABLE, DEFAULT_AUDIT_TIMEOUT_SECS,
    DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_COMPLETION_URL,
};
use crate::{CoreError, CoreResult};
use std::time::Duration;

pub const ENV_COMPLETION_API_KEY: &str = "AI_GATEWAY_API_KEY";
pub const ENV_COMPLETION_URL: &str = "AI_GATEWAY_URL";
pub const ENV_COMPLETION_MODEL: &str = "AI_GATEWAY_MODEL";
pub const ENV_COMPLETION_TIMEOUT_SECS: &str = "AI_GATEWAY_TIMEOUT_SECS";
pub const ENV_STORE_URL: &str = "SUPABASE_URL";
pub const ENV_STORE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_AUDIT_TABLE: &str = "AUDIT_TABLE";
pub const ENV_AUDIT_MAX_ATTEMPTS: &str = "AUDIT_MAX_ATTEMPTS";
pub const ENV_AUDIT_TIMEOUT_SECS: &str = "AUDIT_TIMEOUT_SECS";

/// Settings for the external chat-completion service.
#[derive(Clone)]
pub struct CompletionConfig {
    url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl CompletionConfig {
    pub fn new(url: String, api_key: String, model: String, timeout: Duration) -> CoreResult<Self> {
        require_non_empty(ENV_COMPLETION_API_KEY, &api_key)?;
        require_non_empty(ENV_COMPLETION_URL, &url)?;
        require_non_empty(ENV_COMPLETION_MODEL, &model)?;
        if timeout.is_zero() {
            return Err(CoreError::Configuration(format!(
                "{ENV_COMPLETION_TIMEOUT_SECS} must be greater than zero"
            )));
        }

        Ok(Self {
            url,
            api_key,
            model,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings for the audit store (a PostgREST-compatible table endpoint).
#[derive(Clone)]
pub struct AuditConfig {
    base_url: String,
    service_key: String,
    table: String,
    max_attempts: u32,
    timeout: Duration,
}

impl AuditConfig {
    pub fn new(
        base_url: String,
        service_key: String,
        table: String,
        max_attempts: u32,
        timeout: Duration,
    ) -> CoreResult<Self> {
        require_non_empty(ENV_STORE_URL, &base_url)?;
        require_non_empty(ENV_STORE_KEY, &service_key)?;
        require_non_empty(ENV_AUDIT_TABLE, &table)?;
        if max_attempts == 0 {
            return Err(CoreError::Configuration(format!(
                "{ENV_AUDIT_MAX_ATTEMPTS} must be at least 1"
            )));
        }
        if timeout.is_zero() {
            return Err(CoreError::Configuration(format!(
                "{ENV_AUDIT_TIMEOUT_SECS} must be greater than zero"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            table,
            max_attempts,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Upper bound on one insert attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for AuditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .field("table", &self.table)
            .field("max_attempts", &self.max_attempts)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    completion: CompletionConfig,
    audit: AuditConfig,
}

impl CoreConfig {
    pub fn new(completion: CompletionConfig, audit: AuditConfig) -> Self {
        Self { completion, audit }
    }

    /// Resolve configuration from a key lookup.
    ///
    /// Binaries pass `|key| std::env::var(key).ok()`; tests pass a map lookup. Missing
    /// required values are reported as [`CoreError::Configuration`] naming the variable.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = value(ENV_COMPLETION_API_KEY).ok_or_else(|| missing(ENV_COMPLETION_API_KEY))?;
        let completion = CompletionConfig::new(
            value(ENV_COMPLETION_URL).unwrap_or_else(|| DEFAULT_COMPLETION_URL.into()),
            api_key,
            value(ENV_COMPLETION_MODEL).unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.into()),
            Duration::from_secs(parse_positive(
                ENV_COMPLETION_TIMEOUT_SECS,
                value(ENV_COMPLETION_TIMEOUT_SECS),
                DEFAULT_COMPLETION_TIMEOUT_SECS,
            )?),
        )?;

        let store_url = value(ENV_STORE_URL).ok_or_else(|| missing(ENV_STORE_URL))?;
        let store_key = value(ENV_STORE_KEY).ok_or_else(|| missing(ENV_STORE_KEY))?;
        let max_attempts = parse_positive(
            ENV_AUDIT_MAX_ATTEMPTS,
            value(ENV_AUDIT_MAX_ATTEMPTS),
            u64::from(DEFAULT_AUDIT_MAX_ATTEMPTS),
        )?;
        let max_attempts = u32::try_from(max_attempts).map_err(|_| {
            CoreError::Configuration(format!("{ENV_AUDIT_MAX_ATTEMPTS} is too large"))
        })?;
        let audit = AuditConfig::new(
            store_url,
            store_key,
            value(ENV_AUDIT_TABLE).unwrap_or_else(|| DEFAULT_AUDIT_TABLE.into()),
            max_attempts,
            Duration::from_secs(parse_positive(
                ENV_AUDIT_TIMEOUT_SECS,
                value(ENV_AUDIT_TIMEOUT_SECS),
                DEFAULT_AUDIT_TIMEOUT_SECS,
            )?),
        )?;

        Ok(Self { completion, audit })
    }

    /// Resolve configuration from process environment. Call once, at startup.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn completion(&self) -> &CompletionConfig {
        &self.completion
    }

    pub fn audit(&self) -> &AuditConfig {
        &self.audit
    }
}

fn missing(key: &str) -> CoreError {
    CoreError::Configuration(format!("{key} is not configured"))
}

fn require_non_empty(key: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(missing(key));
    }
    Ok(())
}

fn parse_positive(key: &str, value: Option<String>, default: u64) -> CoreResult<u64> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CoreError::Configuration(format!(
            "{key} must be a positive integer, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_COMPLETION_API_KEY, "secret-key"),
            (ENV_STORE_URL, "https://store.example/"),
            (ENV_STORE_KEY, "service-key"),
        ]
    }

    #[test]
    fn applies_defaults_for_optional_values() {
        let cfg = CoreConfig::from_lookup(lookup_from(&required())).expect("config");

        assert_eq!(cfg.completion().url(), DEFAULT_COMPLETION_URL);
        assert_eq!(cfg.completion().model(), DEFAULT_COMPLETION_MODEL);
        assert_eq!(
            cfg.completion().timeout(),
            Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS)
        );
        assert_eq!(cfg.audit().table(), DEFAULT_AUDIT_TABLE);
        assert_eq!(cfg.audit().max_attempts(), 1);
        assert_eq!(
            cfg.audit().timeout(),
            Duration::from_secs(DEFAULT_AUDIT_TIMEOUT_SECS)
        );
        assert_eq!(cfg.audit().base_url(), "https://store.example");
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != ENV_COMPLETION_API_KEY)
            .collect();
        let err = CoreConfig::from_lookup(lookup_from(&pairs)).expect_err("should fail");
        assert!(
            matches!(err, CoreError::Configuration(msg) if msg.contains(ENV_COMPLETION_API_KEY))
        );
    }

    #[test]
    fn blank_store_key_is_a_configuration_error() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != ENV_STORE_KEY);
        pairs.push((ENV_STORE_KEY, "   "));
        let err = CoreConfig::from_lookup(lookup_from(&pairs)).expect_err("should fail");
        assert!(matches!(err, CoreError::Configuration(msg) if msg.contains(ENV_STORE_KEY)));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let mut pairs = required();
        pairs.push((ENV_COMPLETION_TIMEOUT_SECS, "soon"));
        let err = CoreConfig::from_lookup(lookup_from(&pairs)).expect_err("should fail");
        assert!(
            matches!(err, CoreError::Configuration(msg) if msg.contains("positive integer"))
        );
    }

    #[test]
    fn rejects_zero_audit_attempts() {
        let mut pairs = required();
        pairs.push((ENV_AUDIT_MAX_ATTEMPTS, "0"));
        assert!(CoreConfig::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn audit_timeout_is_configurable_and_must_be_positive() {
        let mut pairs = required();
        pairs.push((ENV_AUDIT_TIMEOUT_SECS, "3"));
        let cfg = CoreConfig::from_lookup(lookup_from(&pairs)).expect("config");
        assert_eq!(cfg.audit().timeout(), Duration::from_secs(3));

        let mut pairs = required();
        pairs.push((ENV_AUDIT_TIMEOUT_SECS, "0"));
        let err = CoreConfig::from_lookup(lookup_from(&pairs)).expect_err("should fail");
        assert!(matches!(err, CoreError::Configuration(msg) if msg.contains(ENV_AUDIT_TIMEOUT_SECS)));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = CoreConfig::from_lookup(lookup_from(&required())).expect("config");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("service-key"));
        assert!(debug.contains("<redacted>"));
    }
}
