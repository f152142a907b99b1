//! Data-acquisition steps tried by a collector, in fixed order:
//! indicator API ([`fetch`]), HTML page ([`scrape`]), literal table ([`reference`]).
//!
//! A live step answers `Ok(Some(_))` with records or `Ok(None)` to let the
//! next step run. `Err(_)` is reserved for broken configuration such as an
//! unparseable URL template.

pub mod fetch;
pub mod reference;
pub mod scrape;
pub(crate) mod wire;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::core::{DsError, Metadata, Record, Topic};

pub use fetch::FetchStrategy;
pub use scrape::{ExtractContext, Extraction, Extractor, ScrapeStrategy};

/// Which step produced a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Api,
    Scrape,
    Reference,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Api => "api",
            Stage::Scrape => "scrape",
            Stage::Reference => "reference",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records from one successful step plus the parameters it used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    pub records: Vec<Record>,
    pub params: Metadata,
}

impl Harvest {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            params: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Boxed future returned by [`Strategy::attempt`].
pub type AttemptFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Harvest>, DsError>> + Send + 'a>>;

/// One live acquisition step.
///
/// Implemented by [`FetchStrategy`] and [`ScrapeStrategy`]; anything else
/// implementing it can be slotted into a
/// [`FallbackCollector`](crate::FallbackCollector) in their place.
pub trait Strategy: Send + Sync {
    /// Try to produce records for `topic`.
    ///
    /// # Errors
    ///
    /// Only for faults that should stop the whole collection. Timeouts,
    /// bad statuses and malformed bodies are reported as `Ok(None)`.
    fn attempt<'a>(&'a self, topic: &'a Topic) -> AttemptFuture<'a>;
}
