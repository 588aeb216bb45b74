//! # Reelquote Core
//!
//! Provider contracts and movie-offer aggregation for the reelquote toolkit.
//!
//! ## Overview
//!
//! This crate provides the foundational components for reelquote:
//!
//! - **Canonical domain models** for catalog entries, provider references,
//!   offers, and quotes
//! - **Provider identifiers** for the fixed backend set
//! - **Provider contract** (`MovieSource`) implemented once per backend
//! - **Offer aggregator** that fans out across providers, merges listings by
//!   title, and compares prices with partial-failure tolerance
//! - **HTTP transport abstraction** with bounded timeouts
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregator`] | Catalog fan-out, merge, and price comparison |
//! | [`config`] | Per-provider settings records |
//! | [`domain`] | Domain models (CatalogEntry, OfferDetail, Quote) |
//! | [`error`] | Validation and configuration error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`log`] | Injected logging dependency |
//! | [`movie_source`] | Provider contract and upstream errors |
//! | [`providers`] | Backend bindings (cinemaworld, filmworld) |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use reelquote_core::{MovieId, OfferAggregator, ProviderId};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Assemble the provider set from the environment
//!     let aggregator = OfferAggregator::builder().build();
//!
//!     // Merged, deduplicated catalog
//!     let catalog = aggregator.build_catalog().await;
//!
//!     // Cheapest offer for one title
//!     let references = HashMap::from([
//!         (ProviderId::Cinemaworld, MovieId::new("cw0080684").unwrap()),
//!         (ProviderId::Filmworld, MovieId::new("fw0080684").unwrap()),
//!     ]);
//!     let quote = aggregator.resolve_quote(&references).await;
//!
//!     for offer in &quote.offers {
//!         println!("{}: {:.2} (cheapest: {})", offer.provider, offer.price, offer.cheapest);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CLI / Embedder  │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Offer Aggregator │────▶│ EventLog         │
//! │ (fan-out, merge) │     │ (injected sink)  │
//! └────────┬─────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Movie Source     │────▶│ HTTP Client      │
//! │ (Provider Trait) │     │ (reqwest/none)   │
//! └────────┬─────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ Domain Models    │
//! │ (Catalog, Quote) │
//! └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Upstream failures are classified and contained at the aggregator
//! boundary — `build_catalog` and `resolve_quote` never fail, they only
//! produce smaller results:
//!
//! ```rust
//! use reelquote_core::{UpstreamError, UpstreamErrorKind};
//!
//! fn classify(error: &UpstreamError) -> &'static str {
//!     match error.kind() {
//!         UpstreamErrorKind::AuthRejected => "check the access token",
//!         UpstreamErrorKind::ServiceUnavailable => "provider is down",
//!         UpstreamErrorKind::MalformedPayload => "provider changed its schema",
//!         _ => "transient upstream fault",
//!     }
//! }
//!
//! let error = UpstreamError::from_status("http://upstream.test/movies", 403);
//! assert_eq!(classify(&error), "check the access token");
//! ```
//!
//! ## Security
//!
//! - Access tokens are read from environment variables only (never logged)
//! - Listing and detail payloads are validated before entering the catalog

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod log;
pub mod movie_source;
pub mod providers;
pub mod source;

// Re-export commonly used types at crate root for convenience

// Aggregator
pub use aggregator::{OfferAggregator, OfferAggregatorBuilder, SourceSnapshot};

// Configuration
pub use config::ProviderSettings;

// Domain models
pub use domain::{parse_price, CatalogEntry, MovieId, OfferDetail, ProviderRef, Quote};

// Error types
pub use error::{ConfigError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Logging
pub use log::{EventLog, NullLog, TracingLog};

// Provider contract
pub use movie_source::{
    MovieSource, RawDetail, RawListing, UpstreamError, UpstreamErrorKind, DEFAULT_LOGO,
};

// Provider bindings
pub use providers::{CinemaWorldSource, FilmWorldSource};

// Source identifiers
pub use source::ProviderId;
