//! Explicit logging dependency for the aggregation layer.
//!
//! Failure containment is the aggregator's contract: upstream and
//! configuration errors never reach its callers, so the injected [`EventLog`]
//! is the only channel through which they become visible. Nothing in this
//! crate touches a process-global logger.

use crate::movie_source::UpstreamError;
use crate::{ConfigError, ProviderId};

/// Sink for per-provider failures suppressed from caller-visible results.
pub trait EventLog: Send + Sync {
    /// A provider could not be constructed and was excluded from the set.
    fn construction_failed(&self, provider: ProviderId, error: &ConfigError);

    /// A provider call failed; its contribution is excluded for this request.
    fn source_failed(&self, provider: ProviderId, operation: &str, error: &UpstreamError);

    /// A listing row was dropped during mandatory-field validation.
    fn listing_dropped(&self, provider: ProviderId, reason: &str);

    /// A detail payload was dropped during offer extraction.
    fn detail_dropped(&self, provider: ProviderId, reason: &str);
}

/// Production sink forwarding to `tracing`.
#[derive(Debug, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn construction_failed(&self, provider: ProviderId, error: &ConfigError) {
        tracing::error!(provider = %provider, error = %error, "provider excluded from active set");
    }

    fn source_failed(&self, provider: ProviderId, operation: &str, error: &UpstreamError) {
        tracing::warn!(
            provider = %provider,
            operation,
            code = error.code(),
            error = %error,
            "provider call failed; contribution excluded"
        );
    }

    fn listing_dropped(&self, provider: ProviderId, reason: &str) {
        tracing::warn!(provider = %provider, reason, "listing row dropped");
    }

    fn detail_dropped(&self, provider: ProviderId, reason: &str) {
        tracing::warn!(provider = %provider, reason, "detail payload dropped");
    }
}

/// Silent sink for embedders that route failures elsewhere.
#[derive(Debug, Default)]
pub struct NullLog;

impl EventLog for NullLog {
    fn construction_failed(&self, _provider: ProviderId, _error: &ConfigError) {}

    fn source_failed(&self, _provider: ProviderId, _operation: &str, _error: &UpstreamError) {}

    fn listing_dropped(&self, _provider: ProviderId, _reason: &str) {}

    fn detail_dropped(&self, _provider: ProviderId, _reason: &str) {}
}
