//! Runtime configuration resolved from environment variables.

use std::num::NonZeroUsize;

/// Environment variable holding `tracing` filter directives.
pub const LOG_ENV: &str = "ZATO_NATIVE_LOG";

/// Environment variable holding the batch pool size.
pub const THREADS_ENV: &str = "ZATO_NATIVE_THREADS";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeConfig {
    /// Filter directives passed to `tracing_subscriber::EnvFilter`.
    pub log_filter: String,
    /// Number of worker threads for batch operations. Always at least 1.
    pub threads: usize,
}

impl Default for NativeConfig {
    fn default() -> Self {
        NativeConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            threads: default_threads(),
        }
    }
}

/// An environment value that was ignored in favour of the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Rejected {
    /// Emit the `warn` event for this value. Callers that resolve
    /// configuration before logging is up hold on to it and call this after.
    pub fn log(&self, config: &NativeConfig) {
        tracing::warn!(
            key = self.key,
            value = %self.value,
            error = %self.reason,
            threads = config.threads,
            "ignoring invalid {}",
            self.key
        );
    }
}

impl NativeConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup, logging any
    /// rejected value immediately.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, rejected) = Self::resolve(lookup);
        for r in &rejected {
            r.log(&config);
        }
        config
    }

    /// Like [`NativeConfig::from_env`], returning rejected values instead of
    /// logging them.
    pub fn resolve_env() -> (Self, Vec<Rejected>) {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Missing or invalid values keep their defaults. Invalid ones are
    /// returned alongside the config.
    pub fn resolve<F>(lookup: F) -> (Self, Vec<Rejected>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NativeConfig::default();
        let mut rejected = Vec::new();

        if let Some(filter) = lookup(LOG_ENV) {
            let filter = filter.trim();
            if !filter.is_empty() {
                config.log_filter = filter.to_string();
            }
        }

        if let Some(raw) = lookup(THREADS_ENV) {
            match raw.trim().parse::<NonZeroUsize>() {
                Ok(n) => config.threads = n.get(),
                Err(e) => rejected.push(Rejected {
                    key: THREADS_ENV,
                    value: raw,
                    reason: e.to_string(),
                }),
            }
        }

        (config, rejected)
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::CapturedLog;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = NativeConfig::from_lookup(|_| None);
        assert_eq!(config.log_filter, "warn");
        assert!(config.threads >= 1);
        assert_eq!(config, NativeConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = NativeConfig::from_lookup(lookup_from(&[
            (LOG_ENV, "zato_native=debug"),
            (THREADS_ENV, " 3 "),
        ]));
        assert_eq!(config.log_filter, "zato_native=debug");
        assert_eq!(config.threads, 3);
    }

    #[test]
    fn test_invalid_threads_fall_back() {
        let default_threads = NativeConfig::default().threads;

        for bad in ["0", "-2", "many", ""] {
            let config = NativeConfig::from_lookup(lookup_from(&[(THREADS_ENV, bad)]));
            assert_eq!(config.threads, default_threads, "value {bad:?}");
        }
    }

    #[test]
    fn test_resolve_returns_rejected_threads() {
        let (config, rejected) = NativeConfig::resolve(lookup_from(&[(THREADS_ENV, "zero")]));
        assert_eq!(config.threads, NativeConfig::default().threads);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].key, THREADS_ENV);
        assert_eq!(rejected[0].value, "zero");

        let (_, rejected) = NativeConfig::resolve(lookup_from(&[(THREADS_ENV, "2")]));
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_invalid_threads_logged_at_warn() {
        let captured = CapturedLog::default();
        let config = tracing::subscriber::with_default(captured.subscriber(), || {
            NativeConfig::from_lookup(lookup_from(&[(THREADS_ENV, "0")]))
        });

        assert_eq!(config.threads, NativeConfig::default().threads);
        let output = captured.contents();
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("ignoring invalid ZATO_NATIVE_THREADS"), "output: {output}");
        assert!(output.contains("value=0"), "output: {output}");
    }

    #[test]
    fn test_valid_threads_not_logged() {
        let captured = CapturedLog::default();
        tracing::subscriber::with_default(captured.subscriber(), || {
            NativeConfig::from_lookup(lookup_from(&[(THREADS_ENV, "4")]))
        });
        assert!(!captured.contents().contains("WARN"));
    }

    #[test]
    fn test_blank_filter_keeps_default() {
        let config = NativeConfig::from_lookup(lookup_from(&[(LOG_ENV, "   ")]));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
