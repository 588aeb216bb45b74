//! Fan-out aggregation across the configured provider set.
//!
//! Both aggregate operations share one containment contract: they always
//! succeed, with possibly-empty or possibly-partial results. Upstream and
//! validation failures are logged through the injected [`EventLog`] and the
//! failing provider's contribution is excluded — a single broken backend
//! never takes down the whole catalog.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ProviderSettings;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::log::{EventLog, TracingLog};
use crate::movie_source::{MovieSource, RawListing, UpstreamError};
use crate::providers::{CinemaWorldSource, FilmWorldSource};
use crate::{CatalogEntry, ConfigError, MovieId, OfferDetail, ProviderId, ProviderRef, Quote};

/// Read-only view of one configured source, for listings and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSnapshot {
    pub id: ProviderId,
    pub logo: String,
}

/// Orchestrates catalog fan-out and per-title price comparison over a fixed,
/// immutable provider list. Holds no other state across calls; safe to share
/// between concurrent requests.
pub struct OfferAggregator {
    sources: Vec<Arc<dyn MovieSource>>,
    log: Arc<dyn EventLog>,
}

impl OfferAggregator {
    /// Source order is semantic: it defines catalog merge order and the
    /// offer order inside a quote.
    pub fn new(sources: Vec<Arc<dyn MovieSource>>, log: Arc<dyn EventLog>) -> Self {
        Self { sources, log }
    }

    pub fn builder() -> OfferAggregatorBuilder {
        OfferAggregatorBuilder::new()
    }

    pub fn snapshots(&self) -> Vec<SourceSnapshot> {
        self.sources
            .iter()
            .map(|source| SourceSnapshot {
                id: source.id(),
                logo: source.logo(),
            })
            .collect()
    }

    /// Fetch every provider's catalog concurrently and merge by exact title.
    ///
    /// Failed providers contribute nothing; rows missing a mandatory field
    /// are dropped individually. The first provider advertising a title
    /// fixes its poster; later providers only append a reference. Entries
    /// come back in first-encountered order (provider order, then listing
    /// order) with no further sorting.
    pub async fn build_catalog(&self) -> Vec<CatalogEntry> {
        let mut handles = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let provider = source.id();
            let task_source = Arc::clone(source);
            handles.push((
                provider,
                tokio::spawn(async move { task_source.list_titles().await }),
            ));
        }

        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut index_by_title: HashMap<String, usize> = HashMap::new();

        // Join barrier: every in-flight call resolves before the merge, and
        // the merge itself runs in registration order for determinism.
        for (provider, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(UpstreamError::transport(
                    "catalog task terminated before completing",
                    join_error,
                )),
            };

            let rows = match outcome {
                Ok(rows) => rows,
                Err(error) => {
                    self.log.source_failed(provider, "list_titles", &error);
                    continue;
                }
            };

            for row in rows {
                self.merge_row(provider, row, &mut entries, &mut index_by_title);
            }
        }

        entries
    }

    /// Fetch detail from each configured provider named in `references` and
    /// compare prices.
    ///
    /// Providers that fail or return a malformed detail (missing
    /// Poster/ID/Price, or a price that does not validate) are skipped. If
    /// nothing survives, the quote is empty — not an error.
    pub async fn resolve_quote(&self, references: &HashMap<ProviderId, MovieId>) -> Quote {
        let mut handles = Vec::with_capacity(references.len());
        for source in &self.sources {
            let provider = source.id();
            let Some(movie_id) = references.get(&provider) else {
                continue;
            };

            let logo = source.logo();
            let task_source = Arc::clone(source);
            let movie_id = movie_id.clone();
            handles.push((
                provider,
                logo,
                tokio::spawn(async move { task_source.fetch_detail(&movie_id).await }),
            ));
        }

        let mut offers = Vec::with_capacity(handles.len());
        for (provider, logo, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(UpstreamError::transport(
                    "detail task terminated before completing",
                    join_error,
                )),
            };

            match outcome {
                Ok(raw) => match OfferDetail::from_raw(provider, logo, raw) {
                    Ok(offer) => offers.push(offer),
                    Err(error) => self.log.detail_dropped(provider, &error.to_string()),
                },
                Err(error) => self.log.source_failed(provider, "fetch_detail", &error),
            }
        }

        Quote::new(offers)
    }

    fn merge_row(
        &self,
        provider: ProviderId,
        row: RawListing,
        entries: &mut Vec<CatalogEntry>,
        index_by_title: &mut HashMap<String, usize>,
    ) {
        let Some(title) = row.title else {
            self.log
                .listing_dropped(provider, "listing missing mandatory field 'Title'");
            return;
        };
        let Some(id) = row.id else {
            self.log
                .listing_dropped(provider, "listing missing mandatory field 'ID'");
            return;
        };
        let Some(poster) = row.poster else {
            self.log
                .listing_dropped(provider, "listing missing mandatory field 'Poster'");
            return;
        };
        let movie_id = match MovieId::new(id) {
            Ok(movie_id) => movie_id,
            Err(error) => {
                self.log.listing_dropped(provider, &error.to_string());
                return;
            }
        };

        let reference = ProviderRef::new(provider, movie_id);
        match index_by_title.get(&title) {
            Some(&index) => entries[index].references.push(reference),
            None => {
                index_by_title.insert(title.clone(), entries.len());
                entries.push(CatalogEntry::new(title, poster, reference));
            }
        }
    }
}

/// Builder assembling the fixed provider set.
///
/// Providers whose configuration cannot be loaded are skipped with a logged
/// reason — construction failure is per-provider, never process-fatal, so
/// `build` is infallible.
pub struct OfferAggregatorBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    log: Arc<dyn EventLog>,
    enable_cinemaworld: bool,
    enable_filmworld: bool,
    cinemaworld_settings: Option<ProviderSettings>,
    filmworld_settings: Option<ProviderSettings>,
    extra_sources: Vec<Arc<dyn MovieSource>>,
}

impl Default for OfferAggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferAggregatorBuilder {
    pub fn new() -> Self {
        Self {
            http_client: None,
            log: Arc::new(TracingLog),
            enable_cinemaworld: true,
            enable_filmworld: true,
            cinemaworld_settings: None,
            filmworld_settings: None,
            extra_sources: Vec::new(),
        }
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_log(mut self, log: Arc<dyn EventLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_cinemaworld_settings(mut self, settings: ProviderSettings) -> Self {
        self.cinemaworld_settings = Some(settings);
        self
    }

    pub fn with_filmworld_settings(mut self, settings: ProviderSettings) -> Self {
        self.filmworld_settings = Some(settings);
        self
    }

    pub fn with_cinemaworld_enabled(mut self, enabled: bool) -> Self {
        self.enable_cinemaworld = enabled;
        self
    }

    pub fn with_filmworld_enabled(mut self, enabled: bool) -> Self {
        self.enable_filmworld = enabled;
        self
    }

    /// Register an additional source (appended after the built-in set).
    pub fn with_source(mut self, source: Arc<dyn MovieSource>) -> Self {
        self.extra_sources.push(source);
        self
    }

    pub fn build(self) -> OfferAggregator {
        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let log = self.log;
        let mut sources: Vec<Arc<dyn MovieSource>> = Vec::new();

        if self.enable_cinemaworld {
            match settings_or_env(ProviderId::Cinemaworld, self.cinemaworld_settings) {
                Ok(settings) => sources.push(Arc::new(CinemaWorldSource::new(
                    &settings,
                    Arc::clone(&http_client),
                ))),
                Err(error) => log.construction_failed(ProviderId::Cinemaworld, &error),
            }
        }

        if self.enable_filmworld {
            match settings_or_env(ProviderId::Filmworld, self.filmworld_settings) {
                Ok(settings) => sources.push(Arc::new(FilmWorldSource::new(
                    &settings,
                    Arc::clone(&http_client),
                ))),
                Err(error) => log.construction_failed(ProviderId::Filmworld, &error),
            }
        }

        sources.extend(self.extra_sources);
        OfferAggregator::new(sources, log)
    }
}

fn settings_or_env(
    provider: ProviderId,
    explicit: Option<ProviderSettings>,
) -> Result<ProviderSettings, ConfigError> {
    match explicit {
        Some(settings) => Ok(settings),
        None => ProviderSettings::from_env(provider),
    }
}
