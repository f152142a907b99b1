//! devstats-rs: country development statistics from several public sources.
//!
//! Every source is a [`SourceProfile`] run by the same [`FallbackCollector`]:
//! indicator API first, then the source's web pages, then a built-in
//! reference table. The [`Router`] dispatches `(source, topic)` requests to
//! collectors; [`export`] renders results as CSV or JSON.
//!
//! ```no_run
//! # async fn demo() -> Result<(), devstats_rs::DsError> {
//! let client = devstats_rs::DsClient::default();
//! let router = devstats_rs::Router::with_builtin_sources(&client)?;
//! let result = router.collect("world_bank", "population").await?;
//! println!("{} records", result.records().len());
//! # Ok(()) }
//! ```

pub mod catalog;
pub mod collector;
pub mod core;
pub mod export;
pub mod router;
#[cfg(feature = "server")]
pub mod server;
pub mod sources;
pub mod strategy;

pub use catalog::{Indicator, IndicatorCatalog, ReferenceRow, ReferenceTable};
pub use collector::{Collector, FallbackCollector};
pub use core::{
    Collection, CollectionResult, Country, DsClient, DsClientBuilder, DsError, Metadata,
    RECORD_COLUMNS, Record, TOPICS, Topic, Value,
};
pub use export::{ExportFormat, ExportMeta};
pub use router::Router;
pub use sources::{ApiConfig, PatternSpec, ScrapeConfig, SourceProfile};
pub use strategy::{Harvest, Stage, Strategy};
