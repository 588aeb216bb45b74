//! # Domain Models
//!
//! Canonical domain types for merged catalogs and price comparison.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CatalogEntry`] | One merged, cross-provider title record |
//! | [`ProviderRef`] | (provider, provider-local id) pair locating one record |
//! | [`OfferDetail`] | One provider's priced detail for a title |
//! | [`Quote`] | Price-compared offer collection with cheapest flags |
//! | [`MovieId`] | Opaque, non-empty provider-local identifier |
//!
//! ## Validation
//!
//! Prices are validated at extraction time: a `Price` field that is missing,
//! non-numeric, non-finite, or negative disqualifies the whole offer —
//! invalid offers are dropped upstream, never carried as zero-priced.
//! Titles, by contrast, are *not* validated or normalized: the merge key is
//! the exact advertised string.

mod models;
mod movie_id;

pub use models::{parse_price, CatalogEntry, OfferDetail, ProviderRef, Quote};
pub use movie_id::MovieId;
