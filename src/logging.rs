//! Process-wide `tracing` subscriber setup.
//!
//! The library is loaded into a host process that may already have installed
//! a subscriber, so installation is best effort and happens at most once.

use std::sync::OnceLock;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{NativeConfig, Rejected, DEFAULT_LOG_FILTER};

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install a stderr subscriber filtered by `config.log_filter`.
///
/// Returns true only for the call that installed it.
pub fn init(config: &NativeConfig) -> bool {
    let mut installed_now = false;

    INSTALLED.get_or_init(|| {
        let (filter, rejected) = filter_or_default(&config.log_filter);
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();

        installed_now = result.is_ok();
        if installed_now {
            tracing::debug!(filter = %config.log_filter, "logging initialized");
        }
        // Emitted after installation so the event is not dropped
        if let Some(e) = rejected {
            warn_rejected_filter(&config.log_filter, &e);
        }
        installed_now
    });

    installed_now
}

/// [`init`], then log the configuration values that were rejected while
/// resolving `config`. Resolving happens before any subscriber exists, so
/// those warnings are held back until now.
pub fn init_with_rejected(config: &NativeConfig, rejected: &[Rejected]) -> bool {
    let installed_now = init(config);
    for r in rejected {
        r.log(config);
    }
    installed_now
}

/// Whether this library installed the global subscriber.
pub fn is_installed() -> bool {
    INSTALLED.get().copied().unwrap_or(false)
}

fn filter_or_default(directives: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    }
}

fn warn_rejected_filter(directives: &str, e: &ParseError) {
    tracing::warn!(
        filter = %directives,
        error = %e,
        "invalid log filter, using {DEFAULT_LOG_FILTER:?}"
    );
}

/// In-memory log sink for asserting on emitted events.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLog {
    /// A subscriber writing every level to this sink, for use with
    /// `tracing::subscriber::with_default`.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }

    pub(crate) fn contents(&self) -> String {
        let buf = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = NativeConfig::default();
        init(&config);
        // Whatever the first call did, later calls never install again
        assert!(!init(&config));
        assert!(!init(&config));
    }

    #[test]
    fn test_invalid_filter_falls_back() {
        let (_, rejected) = filter_or_default("zato_native=loud");
        assert!(rejected.is_some());

        let (_, rejected) = filter_or_default("zato_native=trace,warn");
        assert!(rejected.is_none());
    }

    #[test]
    fn test_rejected_values_logged_after_init() {
        let (config, rejected) = NativeConfig::resolve(|key| {
            (key == crate::config::THREADS_ENV).then(|| "0".to_string())
        });
        assert_eq!(rejected.len(), 1);

        let captured = CapturedLog::default();
        tracing::subscriber::with_default(captured.subscriber(), || {
            init_with_rejected(&config, &rejected);
        });

        let output = captured.contents();
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("ignoring invalid ZATO_NATIVE_THREADS"), "output: {output}");
    }

    #[test]
    fn test_invalid_filter_logged_at_warn() {
        let captured = CapturedLog::default();
        tracing::subscriber::with_default(captured.subscriber(), || {
            let (_, rejected) = filter_or_default("zato_native=loud");
            if let Some(e) = rejected {
                warn_rejected_filter("zato_native=loud", &e);
            }
        });

        let output = captured.contents();
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("invalid log filter"), "output: {output}");
        assert!(output.contains("zato_native=loud"), "output: {output}");
    }
}
