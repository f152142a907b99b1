#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use devstats_rs::catalog::ReferenceRow;
use devstats_rs::strategy::AttemptFuture;
use devstats_rs::{
    ApiConfig, DsClient, Harvest, IndicatorCatalog, Record, ReferenceTable, ScrapeConfig,
    SourceProfile, Strategy, Topic,
};
use httpmock::MockServer;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn client() -> DsClient {
    DsClient::builder().build().unwrap()
}

/// API section pointed at the mock server, no politeness delay.
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.url("/v2"),
        delay_ms: 0,
        timeout_secs: 2,
        ..ApiConfig::default()
    }
}

pub fn scrape_config(server: &MockServer, pages: &[&str]) -> ScrapeConfig {
    let urls: Vec<String> = pages.iter().map(|p| server.url(*p)).collect();
    let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let mut cfg = ScrapeConfig::new(&refs);
    cfg.timeout_secs = 2;
    cfg
}

pub fn catalog() -> IndicatorCatalog {
    IndicatorCatalog::new()
        .with_topic(
            "population",
            &[
                ("SP.POP.TOTL", "Total Population"),
                ("SP.POP.GROW", "Population Growth Rate"),
            ],
        )
        .with_topic("health", &[("SP.DYN.LE00.IN", "Life Expectancy")])
}

pub fn reference() -> ReferenceTable {
    ReferenceTable::new().with_topic(
        "population",
        vec![
            ReferenceRow::new("Total Population", "20.2 million")
                .unit("people")
                .year("2025"),
        ],
    )
}

/// A source with every step configured against `server`.
pub fn test_profile(server: &MockServer) -> SourceProfile {
    SourceProfile::new("test_bank", "Test Bank")
        .with_api(api_config(server))
        .with_scrape(scrape_config(server, &["/en/country/{country}"]))
        .with_catalog(catalog())
        .with_reference(reference())
}

/// A source with only a reference table.
pub fn reference_profile() -> SourceProfile {
    SourceProfile::new("test_ref", "Test Reference").with_reference(reference())
}

pub fn record(indicator: &str, value: &str) -> Record {
    Record::new(indicator, value, "Zambia", "Mock")
}

#[derive(Clone)]
pub enum Behaviour {
    Records(Vec<Record>),
    Nothing,
    Fail(String),
    Panic,
}

/// Strategy double that counts how often it was attempted.
#[derive(Clone)]
pub struct CountingStrategy {
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
}

impl CountingStrategy {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Strategy for CountingStrategy {
    fn attempt<'a>(&'a self, _topic: &'a Topic) -> AttemptFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behaviour = self.behaviour.clone();
        Box::pin(async move {
            match behaviour {
                Behaviour::Records(records) => {
                    Ok(Some(Harvest::new(records).with_param("mock", true)))
                }
                Behaviour::Nothing => Ok(None),
                Behaviour::Fail(msg) => Err(devstats_rs::DsError::Data(msg)),
                Behaviour::Panic => panic!("strategy exploded"),
            }
        })
    }
}

pub fn wb_body(observations: &str) -> String {
    format!(r#"[{{"page":1,"pages":1,"per_page":50,"total":2}},{observations}]"#)
}
