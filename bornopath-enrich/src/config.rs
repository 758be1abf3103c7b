//! Runtime configuration for enrichment runs

use crate::error::{EnrichError, EnrichResult};
use std::time::Duration;

/// Environment variable overriding the worker-pool width
pub const WORKERS_ENV: &str = "BORNOPATH_WORKERS";
/// Environment variable overriding the per-call timeout, in seconds
pub const TIMEOUT_ENV: &str = "BORNOPATH_TIMEOUT_SECS";

/// Settings consumed by the orchestrator and the HTTP sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichConfig {
    /// Number of words enriched in parallel (at least 1)
    pub workers: usize,
    /// Upper bound on any single source lookup
    pub call_timeout: Duration,
    /// Upper bound on fetching a page to harvest words from
    pub page_timeout: Duration,
}

impl EnrichConfig {
    pub const DEFAULT_WORKERS: usize = 10;
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(12);

    /// Defaults overridden by `BORNOPATH_WORKERS` and `BORNOPATH_TIMEOUT_SECS`
    ///
    /// # Errors
    /// Returns `EnrichError::Config` when a variable is set but not a positive integer.
    pub fn from_env() -> EnrichResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EnrichResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(WORKERS_ENV) {
            config = config.with_workers(parse_positive(WORKERS_ENV, &raw)? as usize);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config = config.with_call_timeout(Duration::from_secs(parse_positive(TIMEOUT_ENV, &raw)?));
        }
        Ok(config)
    }

    /// Set the worker-pool width; zero is raised to one
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            workers: Self::DEFAULT_WORKERS,
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
            page_timeout: Self::DEFAULT_PAGE_TIMEOUT,
        }
    }
}

fn parse_positive(key: &str, raw: &str) -> EnrichResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(EnrichError::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnrichConfig::default();
        assert_eq!(config.workers, 10);
        assert_eq!(config.call_timeout, Duration::from_secs(10));
        assert_eq!(config.page_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_env_overrides() {
        let config =
            EnrichConfig::from_lookup(lookup(&[(WORKERS_ENV, "4"), (TIMEOUT_ENV, " 8 ")])).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.call_timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_env_rejects_invalid_values() {
        let result = EnrichConfig::from_lookup(lookup(&[(WORKERS_ENV, "0")]));
        match result {
            Err(EnrichError::Config(msg)) => assert!(msg.contains(WORKERS_ENV)),
            _ => panic!("Expected Config error"),
        }
        assert!(EnrichConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).is_err());
    }

    #[test]
    fn test_page_timeout_is_independent() {
        let config = EnrichConfig::default().with_page_timeout(Duration::from_secs(30));
        assert_eq!(config.page_timeout, Duration::from_secs(30));
        assert_eq!(config.call_timeout, EnrichConfig::DEFAULT_CALL_TIMEOUT);
    }

    #[test]
    fn test_workers_never_zero() {
        assert_eq!(EnrichConfig::default().with_workers(0).workers, 1);
    }
}
