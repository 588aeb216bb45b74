//! Behavior tests for catalog fan-out and cross-provider merging.
//!
//! These verify HOW the aggregator merges listings and isolates provider
//! failures, driven entirely through scripted offline transports.

use std::sync::Arc;

use reelquote_core::{EventLog, ProviderId};
use reelquote_tests::{aggregator_over, aggregator_with_log, CollectingLog, ScriptedHttpClient};

// =============================================================================
// Catalog: Merging
// =============================================================================

#[tokio::test]
async fn when_every_provider_succeeds_catalog_is_the_union_of_distinct_titles() {
    // Given: both providers answer, overlapping on one title
    let client = ScriptedHttpClient::new()
        .ok(
            "cinemaworld/movies",
            r#"{"Movies":[
                {"ID":"cw1","Title":"X","Poster":"p"},
                {"ID":"cw2","Title":"Y","Poster":"py"}
            ]}"#,
        )
        .ok(
            "filmworld/movies",
            r#"{"Movies":[
                {"ID":"fw9","Title":"X","Poster":"q"},
                {"ID":"fw8","Title":"Z","Poster":"pz"}
            ]}"#,
        );

    // When: the catalog is built
    let catalog = aggregator_over(client).build_catalog().await;

    // Then: three distinct titles, each referencing every provider that
    // offers that exact title string
    assert_eq!(catalog.len(), 3);
    let shared = &catalog[0];
    assert_eq!(shared.title, "X");
    assert_eq!(shared.references.len(), 2);
    assert_eq!(catalog[1].references.len(), 1);
    assert_eq!(catalog[2].references.len(), 1);
}

#[tokio::test]
async fn merged_entry_keeps_first_seen_poster_and_both_references() {
    let client = ScriptedHttpClient::new()
        .ok(
            "cinemaworld/movies",
            r#"{"Movies":[{"ID":"1","Title":"X","Poster":"p"}]}"#,
        )
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"9","Title":"X","Poster":"q"}]}"#,
        );

    let catalog = aggregator_over(client).build_catalog().await;

    assert_eq!(catalog.len(), 1);
    let entry = &catalog[0];
    assert_eq!(entry.poster, "p");
    assert_eq!(entry.references[0].provider, ProviderId::Cinemaworld);
    assert_eq!(entry.references[0].movie_id.as_str(), "1");
    assert_eq!(entry.references[1].provider, ProviderId::Filmworld);
    assert_eq!(entry.references[1].movie_id.as_str(), "9");
}

#[tokio::test]
async fn titles_merge_on_exact_string_equality_only() {
    // "X" and "x " are different titles: no case folding, no trimming
    let client = ScriptedHttpClient::new()
        .ok(
            "cinemaworld/movies",
            r#"{"Movies":[{"ID":"1","Title":"X","Poster":"p"}]}"#,
        )
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"9","Title":"x ","Poster":"q"}]}"#,
        );

    let catalog = aggregator_over(client).build_catalog().await;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].title, "X");
    assert_eq!(catalog[1].title, "x ");
}

#[tokio::test]
async fn catalog_preserves_first_encountered_order() {
    let client = ScriptedHttpClient::new()
        .ok(
            "cinemaworld/movies",
            r#"{"Movies":[
                {"ID":"1","Title":"B","Poster":"pb"},
                {"ID":"2","Title":"A","Poster":"pa"}
            ]}"#,
        )
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"9","Title":"C","Poster":"pc"}]}"#,
        );

    let catalog = aggregator_over(client).build_catalog().await;

    let titles = catalog.iter().map(|e| e.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["B", "A", "C"]);
}

// =============================================================================
// Catalog: Failure Isolation
// =============================================================================

#[tokio::test]
async fn when_one_provider_returns_500_remaining_entries_still_surface() {
    // Given: cinemaworld is down, filmworld answers
    let log = Arc::new(CollectingLog::default());
    let client = ScriptedHttpClient::new()
        .status("cinemaworld/movies", 500)
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"fw1","Title":"Y","Poster":"py"}]}"#,
        );

    // When: the catalog is built
    let catalog = aggregator_with_log(client, Arc::clone(&log) as Arc<dyn EventLog>)
        .build_catalog()
        .await;

    // Then: the healthy provider's entries survive and the failure is logged
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title, "Y");
    let events = log.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].starts_with("source_failed cinemaworld list_titles"));
    assert!(events[0].contains("upstream.service_unavailable"));
}

#[tokio::test]
async fn when_one_provider_times_out_catalog_never_raises() {
    let client = ScriptedHttpClient::new()
        .transport_failure("cinemaworld/movies", "request timeout: deadline elapsed")
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"fw1","Title":"Y","Poster":"py"}]}"#,
        );

    let catalog = aggregator_over(client).build_catalog().await;

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title, "Y");
}

#[tokio::test]
async fn when_every_provider_fails_catalog_is_empty_not_an_error() {
    let client = ScriptedHttpClient::new()
        .status("cinemaworld/movies", 503)
        .transport_failure("filmworld/movies", "connection failed: refused");

    let catalog = aggregator_over(client).build_catalog().await;

    assert!(catalog.is_empty());
}

// =============================================================================
// Catalog: Row Validation
// =============================================================================

#[tokio::test]
async fn listing_row_missing_id_is_excluded_entirely() {
    // Given: one row lacks ID, its sibling is complete
    let log = Arc::new(CollectingLog::default());
    let client = ScriptedHttpClient::new()
        .ok(
            "cinemaworld/movies",
            r#"{"Movies":[
                {"Title":"Broken","Poster":"p"},
                {"ID":"cw2","Title":"Fine","Poster":"p2"}
            ]}"#,
        )
        .ok("filmworld/movies", r#"{"Movies":[]}"#);

    // When: the catalog is built
    let catalog = aggregator_with_log(client, Arc::clone(&log) as Arc<dyn EventLog>)
        .build_catalog()
        .await;

    // Then: no partial entry exists for the broken row
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title, "Fine");
    assert!(log
        .events()
        .iter()
        .any(|event| event.starts_with("listing_dropped cinemaworld") && event.contains("'ID'")));
}

#[tokio::test]
async fn listing_without_movies_envelope_drops_the_whole_provider() {
    let log = Arc::new(CollectingLog::default());
    let client = ScriptedHttpClient::new()
        .ok("cinemaworld/movies", r#"{"Results":[]}"#)
        .ok(
            "filmworld/movies",
            r#"{"Movies":[{"ID":"fw1","Title":"Y","Poster":"py"}]}"#,
        );

    let catalog = aggregator_with_log(client, Arc::clone(&log) as Arc<dyn EventLog>)
        .build_catalog()
        .await;

    assert_eq!(catalog.len(), 1);
    assert!(log.events()[0].contains("upstream.malformed_payload"));
}
