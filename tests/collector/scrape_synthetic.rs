use std::sync::Arc;

use crate::common;
use devstats_rs::{Collector, FallbackCollector, PatternSpec, SourceProfile, Value};
use httpmock::Method::GET;

fn page(body: &str) -> String {
    format!("<!doctype html><html><head><title>Zambia</title></head><body>{body}</body></html>")
}

/// Scrape-only profile over the given mock paths.
fn scrape_profile(server: &httpmock::MockServer, pages: &[&str]) -> SourceProfile {
    SourceProfile::new("portal", "Portal")
        .with_scrape(common::scrape_config(server, pages))
        .with_reference(common::reference())
}

#[tokio::test]
async fn labeled_paragraph_becomes_a_record() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200)
            .header("content-type", "text/html")
            .body(page("<p>Total Population: 20,218,000</p>"));
    });

    let client = common::client();
    let profile = scrape_profile(&server, &["/en/country/{country}"]);
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("population").await;

    mock.assert();
    assert!(result.is_success());
    let records = result.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].indicator, "Total Population");
    assert_eq!(records[0].value, Value::Text("20,218,000".into()));
    assert_eq!(records[0].source, "Portal Website");

    let meta = result.metadata().unwrap();
    assert_eq!(meta["strategy"], "scrape");
    assert_eq!(meta["structured_count"], 1);
    assert_eq!(meta["text_count"], 0);
    assert_eq!(meta["url"], server.url("/en/country/zambia"));
}

#[tokio::test]
async fn table_rows_use_first_two_cells() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200).body(page(
            r#"<table>
                 <tr><th>Indicator</th><th>Value</th></tr>
                 <tr><td>Population density</td><td>27 people per sq km</td></tr>
                 <tr><td>Urban population</td><td>46.3 %</td></tr>
                 <tr><td>Capital</td><td>Lusaka</td></tr>
               </table>"#,
        ));
    });

    let client = common::client();
    let profile = scrape_profile(&server, &["/en/country/{country}"]);
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("population").await;

    let names: Vec<_> = result.records().iter().map(|r| r.indicator.as_str()).collect();
    assert_eq!(names, ["Population density", "Urban population"]);
}

#[tokio::test]
async fn later_pages_are_tried_when_earlier_ones_fail() {
    let server = common::setup_server();

    let first = server.mock(|when, then| {
        when.method(GET).path("/Countries/ZMB");
        then.status(503);
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/profile/ZMB");
        then.status(200)
            .body(page("<p>Real GDP growth is projected at 5.8 percent in 2025.</p>"));
    });

    let client = common::client();
    let profile = scrape_profile(&server, &["/Countries/{iso3}", "/profile/{iso3}"]);
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("economy").await;

    first.assert();
    second.assert();
    assert_eq!(result.metadata().unwrap()["url"], server.url("/profile/ZMB"));
    assert_eq!(result.records()[0].indicator, "Zambia Economy Data");
}

#[tokio::test]
async fn free_text_patterns_follow_structured_records() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/zambia");
        then.status(200).body(page(
            r#"<div>
                 <h2>Our work</h2>
                 <p>Health programs: 12 clinics</p>
               </div>
               <section>USAID invested $45.5 million in Zambia, reaching 1,200,000 beneficiaries.</section>
               <script>var budget = "$99 million";</script>"#,
        ));
    });

    let mut cfg = common::scrape_config(&server, &["/{country}"]);
    cfg = cfg.with_patterns(vec![
        PatternSpec::new(
            "Funding Amount",
            r"\$(\d+(?:,\d{3})*(?:\.\d+)?\s*(?:million|billion))",
        )
        .unit("USD")
        .value_prefix("$"),
        PatternSpec::new("Program Reach", r"(\d+(?:,\d{3})*)\s*beneficiaries"),
        PatternSpec::new("Mining Output", r"(\d+)\s*tonnes").for_topics(&["mining"]),
    ]);
    let profile = SourceProfile::new("aid", "Aid Agency").with_scrape(cfg);

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("health").await;

    let records = result.records();
    assert_eq!(records.len(), 3, "{records:#?}");

    assert_eq!(records[0].indicator, "Health programs");
    assert_eq!(records[0].value, Value::Text("12 clinics".into()));

    assert_eq!(records[1].indicator, "Funding Amount 1");
    assert_eq!(records[1].value, Value::Text("$45.5 million".into()));
    assert_eq!(records[1].unit.as_deref(), Some("USD"));
    assert!(records[1].note.as_deref().unwrap().contains("$45.5 million"));

    assert_eq!(records[2].indicator, "Program Reach 1");
    assert_eq!(records[2].value, Value::Text("1,200,000".into()));

    let meta = result.metadata().unwrap();
    assert_eq!(meta["structured_count"], 1);
    assert_eq!(meta["text_count"], 2);
}

#[tokio::test]
async fn page_without_statistics_falls_to_reference() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200)
            .body(page("<p>Welcome to our country page.</p><p>Contact us</p>"));
    });

    let client = common::client();
    let profile = scrape_profile(&server, &["/en/country/{country}"]);
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("population").await;

    assert_eq!(result.metadata().unwrap()["strategy"], "reference");
}

#[tokio::test]
async fn bad_pattern_is_rejected_at_construction() {
    let server = common::setup_server();
    let cfg = common::scrape_config(&server, &["/x"])
        .with_patterns(vec![PatternSpec::new("Broken", r"(\d+")]);
    let profile = SourceProfile::new("broken", "Broken").with_scrape(cfg);

    let err = FallbackCollector::new(&common::client(), Arc::new(profile))
        .err()
        .expect("invalid regex must fail");
    assert!(matches!(err, devstats_rs::DsError::Pattern(_)), "{err:?}");
}

#[tokio::test]
async fn unparseable_page_is_rejected_at_construction() {
    let cfg = devstats_rs::ScrapeConfig::new(&["not a url/{iso3}"]);
    let profile = SourceProfile::new("p", "P")
        .with_scrape(cfg)
        .with_reference(common::reference());

    let err = FallbackCollector::new(&common::client(), Arc::new(profile))
        .err()
        .expect("relative page template must fail");
    assert!(matches!(err, devstats_rs::DsError::Config(_)), "{err:?}");
}
