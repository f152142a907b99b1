use std::sync::Arc;

use crate::common::{self, Behaviour, CountingStrategy};
use devstats_rs::{Collector, Country, FallbackCollector};

fn collector(fetch: &CountingStrategy, scrape: &CountingStrategy) -> FallbackCollector {
    FallbackCollector::reference_only(Arc::new(common::reference_profile()), Country::default())
        .with_fetch(fetch.clone())
        .with_scrape(scrape.clone())
}

#[tokio::test]
async fn fetch_success_short_circuits() {
    let fetch = CountingStrategy::new(Behaviour::Records(vec![common::record("GDP", "29.1")]));
    let scrape = CountingStrategy::new(Behaviour::Records(vec![common::record("x", "1")]));

    let result = collector(&fetch, &scrape).collect("population").await;

    assert!(result.is_success());
    assert_eq!(result.records(), &[common::record("GDP", "29.1")]);
    assert_eq!(fetch.calls(), 1);
    assert_eq!(scrape.calls(), 0, "scrape must not run after a fetch hit");
    let meta = result.metadata().unwrap();
    assert_eq!(meta["strategy"], "api");
    assert_eq!(meta["source"], "Test Reference API");
    assert_eq!(meta["records_count"], 1);
    assert_eq!(meta["mock"], true);
}

#[tokio::test]
async fn empty_fetch_falls_through_to_scrape_once() {
    let fetch = CountingStrategy::new(Behaviour::Nothing);
    let scrape = CountingStrategy::new(Behaviour::Records(vec![
        common::record("Total Population", "20,218,000"),
    ]));

    let result = collector(&fetch, &scrape).collect("population").await;

    assert_eq!(fetch.calls(), 1);
    assert_eq!(scrape.calls(), 1);
    assert_eq!(result.metadata().unwrap()["strategy"], "scrape");
    assert_eq!(result.records()[0].indicator, "Total Population");
}

#[tokio::test]
async fn empty_harvest_counts_as_no_result() {
    let fetch = CountingStrategy::new(Behaviour::Records(Vec::new()));
    let scrape = CountingStrategy::new(Behaviour::Nothing);

    let result = collector(&fetch, &scrape).collect("population").await;

    assert_eq!(scrape.calls(), 1);
    assert_eq!(result.metadata().unwrap()["strategy"], "reference");
}

#[tokio::test]
async fn reference_records_are_marked() {
    let fetch = CountingStrategy::new(Behaviour::Nothing);
    let scrape = CountingStrategy::new(Behaviour::Nothing);

    let result = collector(&fetch, &scrape).collect("Population").await;

    assert!(result.is_success());
    let meta = result.metadata().unwrap();
    assert_eq!(meta["strategy"], "reference");
    assert_eq!(meta["source"], "Test Reference Reference Data");
    assert_eq!(meta["country"], "Zambia");
    assert_eq!(meta["topic"], "population");

    let rec = &result.records()[0];
    assert_eq!(rec.source, "Test Reference Reference Data");
    assert!(
        rec.note.as_deref().unwrap().contains("not live data"),
        "reference rows must be distinguishable from live data"
    );
}

#[tokio::test]
async fn missing_reference_topic_is_a_failure() {
    let fetch = CountingStrategy::new(Behaviour::Nothing);
    let scrape = CountingStrategy::new(Behaviour::Nothing);

    let result = collector(&fetch, &scrape).collect("mining").await;

    assert!(!result.is_success());
    assert!(result.records().is_empty());
    let msg = result.error().unwrap();
    assert!(msg.contains("No data source produced information"), "{msg}");
    assert!(msg.contains("mining"), "{msg}");
}

#[tokio::test]
async fn blank_topic_is_a_failure_without_attempts() {
    let fetch = CountingStrategy::new(Behaviour::Nothing);
    let scrape = CountingStrategy::new(Behaviour::Nothing);

    let result = collector(&fetch, &scrape).collect("   ").await;

    assert!(!result.is_success());
    assert_eq!(fetch.calls(), 0);
}

#[tokio::test]
async fn strategy_error_becomes_failure() {
    let fetch = CountingStrategy::new(Behaviour::Fail("boom".into()));
    let scrape = CountingStrategy::new(Behaviour::Records(vec![common::record("x", "1")]));

    let result = collector(&fetch, &scrape).collect("population").await;

    let msg = result.error().expect("failure expected");
    assert!(msg.starts_with("Test Reference data collection failed"), "{msg}");
    assert!(msg.contains("boom"), "{msg}");
    assert_eq!(scrape.calls(), 0);
}

#[tokio::test]
async fn strategy_panic_becomes_failure() {
    let fetch = CountingStrategy::new(Behaviour::Nothing);
    let scrape = CountingStrategy::new(Behaviour::Panic);

    let result = collector(&fetch, &scrape).collect("population").await;

    let msg = result.error().expect("failure expected");
    assert!(msg.contains("strategy exploded"), "{msg}");
}

#[tokio::test]
async fn repeated_reference_collections_are_identical() {
    let c = FallbackCollector::reference_only(
        Arc::new(common::reference_profile()),
        Country::default(),
    );

    let first = c.collect("population").await;
    let second = c.collect("population").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn collector_reports_profile_identity() {
    let c = FallbackCollector::reference_only(
        Arc::new(common::reference_profile()),
        Country::default(),
    );
    assert_eq!(c.id(), "test_ref");
    assert_eq!(c.name(), "Test Reference");
}
