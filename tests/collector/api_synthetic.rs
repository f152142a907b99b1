use std::sync::Arc;

use crate::common;
use devstats_rs::{Collector, FallbackCollector, Value};
use httpmock::Method::GET;

const POP: &str = "/v2/country/ZMB/indicator/SP.POP.TOTL";
const GROWTH: &str = "/v2/country/ZMB/indicator/SP.POP.GROW";

#[tokio::test]
async fn api_records_carry_catalog_names_and_years() {
    let server = common::setup_server();

    let pop = server.mock(|when, then| {
        when.method(GET)
            .path(POP)
            .query_param("format", "json")
            .query_param("date", "2015:2023")
            .query_param("per_page", "50");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::wb_body(
                r#"[{"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"date":"2023","value":20569737},
                    {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"date":"2022","value":null}]"#,
            ));
    });
    let growth = server.mock(|when, then| {
        when.method(GET).path(GROWTH);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::wb_body(
                r#"[{"indicator":{"id":"SP.POP.GROW","value":"Population growth"},"date":"2023","value":2.8}]"#,
            ));
    });

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(common::test_profile(&server))).unwrap();
    let result = c.collect("population").await;

    pop.assert();
    growth.assert();
    assert!(result.is_success(), "{:?}", result.error());

    let records = result.records();
    assert_eq!(records.len(), 2, "null observations are skipped");
    assert_eq!(records[0].indicator, "Total Population");
    assert_eq!(records[0].indicator_code.as_deref(), Some("SP.POP.TOTL"));
    assert_eq!(records[0].value, Value::Number(20_569_737.0));
    assert_eq!(records[0].year.as_deref(), Some("2023"));
    assert_eq!(records[0].source, "Test Bank API");
    assert_eq!(records[0].country, "Zambia");
    assert_eq!(records[1].indicator, "Population Growth Rate");

    let meta = result.metadata().unwrap();
    assert_eq!(meta["strategy"], "api");
    assert_eq!(meta["indicators_requested"], 2);
    assert_eq!(meta["indicators_with_data"], 2);
    assert_eq!(meta["date_range"], "2015:2023");
}

#[tokio::test]
async fn failing_indicator_is_skipped() {
    let server = common::setup_server();

    let pop = server.mock(|when, then| {
        when.method(GET).path(POP);
        then.status(500).body("upstream down");
    });
    let growth = server.mock(|when, then| {
        when.method(GET).path(GROWTH);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::wb_body(r#"[{"date":"2023","value":2.8}]"#));
    });

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(common::test_profile(&server))).unwrap();
    let result = c.collect("population").await;

    pop.assert();
    growth.assert();
    assert_eq!(result.records().len(), 1);
    assert_eq!(result.records()[0].indicator, "Population Growth Rate");
    assert_eq!(result.metadata().unwrap()["indicators_with_data"], 1);
}

#[tokio::test]
async fn malformed_and_error_envelopes_are_skipped() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(POP);
        then.status(200).body("<html>not json</html>");
    });
    server.mock(|when, then| {
        when.method(GET).path(GROWTH);
        then.status(200).body(
            r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#,
        );
    });
    let page = server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><p>Total Population: 20,218,000</p></body></html>");
    });

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(common::test_profile(&server))).unwrap();
    let result = c.collect("population").await;

    page.assert();
    assert_eq!(result.metadata().unwrap()["strategy"], "scrape");
}

#[tokio::test]
async fn null_observation_list_falls_through() {
    let server = common::setup_server();

    let pop = server.mock(|when, then| {
        when.method(GET).path(POP);
        then.status(200).body(r#"[{"page":0,"pages":0,"total":0},null]"#);
    });
    let growth = server.mock(|when, then| {
        when.method(GET).path(GROWTH);
        then.status(200).body(common::wb_body("[]"));
    });
    let page = server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(404);
    });

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(common::test_profile(&server))).unwrap();
    let result = c.collect("population").await;

    pop.assert();
    growth.assert();
    page.assert();
    let meta = result.metadata().unwrap();
    assert_eq!(meta["strategy"], "reference");
    assert_eq!(result.records()[0].value, Value::Text("20.2 million".into()));
}

#[tokio::test]
async fn topic_without_catalog_entry_skips_the_api() {
    let server = common::setup_server();

    let api = server.mock(|when, then| {
        when.method(GET).path("/v2/country/ZMB/indicator/SE.ADT.LITR.ZS");
        then.status(200).body(common::wb_body("[]"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200).body("<html><body><p>Nothing to see</p></body></html>");
    });

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(common::test_profile(&server))).unwrap();
    let result = c.collect("education").await;

    api.assert_calls(0);
    assert!(!result.is_success());
}

#[tokio::test]
async fn unreachable_api_falls_through_to_the_scraped_population() {
    let server = common::setup_server();

    let page = server.mock(|when, then| {
        when.method(GET).path("/en/country/zambia");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><div><p>Total Population: 20,218,000</p></div></body></html>");
    });

    let mut profile = common::test_profile(&server).with_catalog(
        devstats_rs::IndicatorCatalog::new().with_topic(
            "population",
            &[
                ("SP.POP.TOTL", "Total Population"),
                ("SP.POP.GROW", "Population Growth Rate"),
                ("SP.URB.TOTL.IN.ZS", "Urban Population"),
            ],
        ),
    );
    // nothing listens on the discard port
    if let Some(api) = profile.api.as_mut() {
        api.base_url = "http://127.0.0.1:9/v2".into();
    }

    let client = common::client();
    let c = FallbackCollector::new(&client, Arc::new(profile)).unwrap();
    let result = c.collect("population").await;

    page.assert();
    assert!(result.is_success());
    let rec = &result.records()[0];
    assert!(rec.indicator.contains("Population"));
    assert_eq!(rec.value.to_string(), "20,218,000");
    assert_eq!(result.metadata().unwrap()["strategy"], "scrape");
}
