//! Provider contract and upstream error taxonomy.
//!
//! Every backend binding implements [`MovieSource`]; schema differences
//! between backends are absorbed by the bindings, which normalize their own
//! wire shapes into the shared [`RawListing`]/[`RawDetail`] representation
//! before the aggregator ever sees them.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::{MovieId, ProviderId};

/// Display asset used when a provider declines to customize its logo.
pub const DEFAULT_LOGO: &str = "/static/reelquote.png";

/// One normalized listing row.
///
/// Fields stay optional on purpose: mandatory-field validation (and per-row
/// dropping) is the aggregator's job, so a backend omitting `ID` on one row
/// must not fail the whole listing parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub title: Option<String>,
    pub id: Option<String>,
    pub poster: Option<String>,
}

/// One provider's detail payload, kept as the parsed JSON object so
/// provider-specific fields pass through unmodified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDetail {
    pub fields: Map<String, Value>,
}

/// Upstream failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    AuthRejected,
    NotFound,
    ServiceUnavailable,
    UnexpectedStatus,
    Transport,
    MalformedPayload,
}

/// Structured upstream error carrying enough context for operational logs.
///
/// These never cross the aggregator boundary: the aggregator logs them and
/// excludes the failing provider's contribution from the current result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    kind: UpstreamErrorKind,
    message: String,
}

impl UpstreamError {
    pub fn auth_rejected(url: &str) -> Self {
        Self {
            kind: UpstreamErrorKind::AuthRejected,
            message: format!("access token rejected for {url}"),
        }
    }

    pub fn not_found(url: &str) -> Self {
        Self {
            kind: UpstreamErrorKind::NotFound,
            message: format!("resource not found at {url}"),
        }
    }

    pub fn service_unavailable(url: &str) -> Self {
        Self {
            kind: UpstreamErrorKind::ServiceUnavailable,
            message: format!("service unavailable for {url}"),
        }
    }

    pub fn unexpected_status(url: &str, status: u16) -> Self {
        Self {
            kind: UpstreamErrorKind::UnexpectedStatus,
            message: format!("unexpected status {status} from {url}"),
        }
    }

    pub fn transport(context: &str, reason: impl Display) -> Self {
        Self {
            kind: UpstreamErrorKind::Transport,
            message: format!("{context}: {reason}"),
        }
    }

    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        Self {
            kind: UpstreamErrorKind::MalformedPayload,
            message: reason.into(),
        }
    }

    /// Map a non-success HTTP status to its upstream error class.
    pub fn from_status(url: &str, status: u16) -> Self {
        match status {
            403 => Self::auth_rejected(url),
            404 => Self::not_found(url),
            500 | 503 => Self::service_unavailable(url),
            other => Self::unexpected_status(url, other),
        }
    }

    pub const fn kind(&self) -> UpstreamErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            UpstreamErrorKind::AuthRejected => "upstream.auth_rejected",
            UpstreamErrorKind::NotFound => "upstream.not_found",
            UpstreamErrorKind::ServiceUnavailable => "upstream.service_unavailable",
            UpstreamErrorKind::UnexpectedStatus => "upstream.unexpected_status",
            UpstreamErrorKind::Transport => "upstream.transport",
            UpstreamErrorKind::MalformedPayload => "upstream.malformed_payload",
        }
    }
}

impl Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for UpstreamError {}

pub type ListTitlesFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<RawListing>, UpstreamError>> + Send + 'a>>;

pub type FetchDetailFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawDetail, UpstreamError>> + Send + 'a>>;

/// Capability set every backend binding must implement.
///
/// # Thread Safety
///
/// Implementations are immutable after construction and shared behind `Arc`
/// across concurrent catalog/quote requests, so they must be `Send + Sync`.
pub trait MovieSource: Send + Sync {
    /// Stable identity used to build cross-provider references.
    fn id(&self) -> ProviderId;

    /// Display-asset locator; falls back to the crate default and never
    /// fails.
    fn logo(&self) -> String {
        DEFAULT_LOGO.to_owned()
    }

    /// Fetch the provider's full catalog, normalized. A payload missing the
    /// provider's listing envelope is an error — partial data is never
    /// returned silently.
    ///
    /// # Errors
    /// - [`UpstreamError`] on any transport, status, or payload problem
    fn list_titles<'a>(&'a self) -> ListTitlesFuture<'a>;

    /// Fetch one title's detail by the provider's own identifier scheme.
    ///
    /// # Errors
    /// - [`UpstreamError`] on any transport, status, or payload problem
    fn fetch_detail<'a>(&'a self, movie_id: &'a MovieId) -> FetchDetailFuture<'a>;
}
