//! The per-source collection engine.
//!
//! [`FallbackCollector`] walks the fixed ladder API -> scrape -> reference for
//! any [`SourceProfile`]. It never fails with an error: a panicking or
//! erroring step is turned into a failure [`CollectionResult`] here.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::core::{Collection, CollectionResult, Country, DsClient, DsError, Topic};
use crate::sources::SourceProfile;
use crate::strategy::{FetchStrategy, Harvest, ScrapeStrategy, Stage, Strategy, reference};

/// Boxed future returned by [`Collector::collect`].
pub type CollectFuture<'a> = Pin<Box<dyn Future<Output = CollectionResult> + Send + 'a>>;

/// Anything the router can dispatch a topic to.
pub trait Collector: Send + Sync {
    /// Router key.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Collect `topic`. Always resolves; faults come back as
    /// [`CollectionResult::Failure`].
    fn collect<'a>(&'a self, topic: &'a str) -> CollectFuture<'a>;
}

/// Collector driven entirely by a [`SourceProfile`].
pub struct FallbackCollector {
    profile: Arc<SourceProfile>,
    country: Country,
    fetch: Option<Box<dyn Strategy>>,
    scrape: Option<Box<dyn Strategy>>,
}

impl FallbackCollector {
    /// Build the API and scrape steps the profile configures.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile fails validation, its API base URL
    /// does not parse, or one of its scrape patterns does not compile.
    pub fn new(client: &DsClient, profile: Arc<SourceProfile>) -> Result<Self, DsError> {
        profile.validate()?;

        let fetch: Option<Box<dyn Strategy>> = match profile.api {
            Some(_) => Some(Box::new(FetchStrategy::new(client, Arc::clone(&profile))?)),
            None => None,
        };
        let scrape: Option<Box<dyn Strategy>> = match profile.scrape {
            Some(_) => Some(Box::new(ScrapeStrategy::new(client, Arc::clone(&profile))?)),
            None => None,
        };

        Ok(Self {
            profile,
            country: client.country().clone(),
            fetch,
            scrape,
        })
    }

    /// A collector with no live steps; only the reference table answers.
    pub fn reference_only(profile: Arc<SourceProfile>, country: Country) -> Self {
        Self {
            profile,
            country,
            fetch: None,
            scrape: None,
        }
    }

    /// Replace the API step.
    #[must_use]
    pub fn with_fetch(mut self, step: impl Strategy + 'static) -> Self {
        self.fetch = Some(Box::new(step));
        self
    }

    /// Replace the scrape step.
    #[must_use]
    pub fn with_scrape(mut self, step: impl Strategy + 'static) -> Self {
        self.scrape = Some(Box::new(step));
        self
    }

    #[must_use]
    pub fn without_fetch(mut self) -> Self {
        self.fetch = None;
        self
    }

    #[must_use]
    pub fn without_scrape(mut self) -> Self {
        self.scrape = None;
        self
    }

    pub fn profile(&self) -> &SourceProfile {
        &self.profile
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    #[tracing::instrument(skip_all, fields(source = %self.profile.id, topic = %topic))]
    async fn run(&self, topic: &Topic) -> Result<CollectionResult, DsError> {
        let live = [
            (Stage::Api, self.fetch.as_deref()),
            (Stage::Scrape, self.scrape.as_deref()),
        ];

        for (stage, step) in live {
            let Some(step) = step else {
                continue;
            };
            match step.attempt(topic).await? {
                Some(harvest) if !harvest.records.is_empty() => {
                    info!(%stage, records = harvest.records.len(), "collected");
                    return Ok(self.success(stage, topic, harvest));
                }
                _ => info!(%stage, "no result; falling through"),
            }
        }

        let records = reference::lookup(&self.profile, &self.country, topic);
        if records.is_empty() {
            warn!("no reference entry for topic");
            return Ok(CollectionResult::failure(format!(
                "No data source produced information for topic '{topic}' from {}: \
                 no live step returned records and the reference table has no entry",
                self.profile.name
            )));
        }
        info!(stage = %Stage::Reference, records = records.len(), "collected");
        Ok(self.success(Stage::Reference, topic, Harvest::new(records)))
    }

    fn success(&self, stage: Stage, topic: &Topic, harvest: Harvest) -> CollectionResult {
        let source = match stage {
            Stage::Api => self.profile.api_label(),
            Stage::Scrape => self.profile.scrape_label(),
            Stage::Reference => self.profile.reference_label(),
        };

        let mut metadata = harvest.params;
        metadata.insert("source".into(), source.into());
        metadata.insert("source_id".into(), self.profile.id.clone().into());
        metadata.insert("country".into(), self.country.name.clone().into());
        metadata.insert("topic".into(), topic.as_str().into());
        metadata.insert("strategy".into(), stage.as_str().into());
        metadata.insert("records_count".into(), harvest.records.len().into());

        CollectionResult::Success(Collection {
            records: harvest.records,
            metadata,
        })
    }

    fn failure(&self, reason: impl std::fmt::Display) -> CollectionResult {
        CollectionResult::failure(format!(
            "{} data collection failed: {reason}",
            self.profile.name
        ))
    }
}

impl Collector for FallbackCollector {
    fn id(&self) -> &str {
        &self.profile.id
    }

    fn name(&self) -> &str {
        &self.profile.name
    }

    fn collect<'a>(&'a self, topic: &'a str) -> CollectFuture<'a> {
        Box::pin(async move {
            let topic = Topic::new(topic);
            if topic.is_empty() {
                return self.failure("no topic given");
            }

            match AssertUnwindSafe(self.run(&topic)).catch_unwind().await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    error!(source = %self.profile.id, %topic, error = %e, "collection aborted");
                    self.failure(e)
                }
                Err(payload) => {
                    let msg = panic_message(payload.as_ref());
                    error!(source = %self.profile.id, %topic, panic = %msg, "collection panicked");
                    self.failure(msg)
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}
