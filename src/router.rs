//! Source-id -> collector dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::collector::{Collector, FallbackCollector};
use crate::core::{CollectionResult, DsClient, DsError};
use crate::sources::{self, SourceProfile};

/// Maps source ids (`world_bank`, `imf`, ...) to collectors.
///
/// Cheap to clone; collectors are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct Router {
    collectors: BTreeMap<String, Arc<dyn Collector>>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("sources", &self.collectors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router over the six built-in source profiles.
    ///
    /// # Errors
    ///
    /// Only if a built-in profile fails to build, which would be a bug.
    pub fn with_builtin_sources(client: &DsClient) -> Result<Self, DsError> {
        Self::from_profiles(client, sources::builtin())
    }

    /// One [`FallbackCollector`] per profile.
    ///
    /// # Errors
    ///
    /// Fails on an invalid profile or on two profiles sharing an id.
    pub fn from_profiles(
        client: &DsClient,
        profiles: impl IntoIterator<Item = SourceProfile>,
    ) -> Result<Self, DsError> {
        let mut router = Self::new();
        for profile in profiles {
            let collector = FallbackCollector::new(client, Arc::new(profile))?;
            if router.insert(collector).is_some() {
                return Err(DsError::Config("duplicate source id in profiles".into()));
            }
        }
        Ok(router)
    }

    /// Register a collector under its id, returning the one it replaced.
    pub fn insert(&mut self, collector: impl Collector + 'static) -> Option<Arc<dyn Collector>> {
        let key = normalize_key(collector.id());
        self.collectors.insert(key, Arc::new(collector))
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn register(mut self, collector: impl Collector + 'static) -> Self {
        self.insert(collector);
        self
    }

    pub fn get(&self, source: &str) -> Option<&Arc<dyn Collector>> {
        self.collectors.get(&normalize_key(source))
    }

    /// `(id, name)` pairs in id order.
    pub fn sources(&self) -> Vec<(&str, &str)> {
        self.collectors
            .iter()
            .map(|(id, c)| (id.as_str(), c.name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Dispatch `topic` to the collector registered for `source`.
    ///
    /// # Errors
    ///
    /// `InvalidParams` for a blank source or topic, `UnknownSource` for an
    /// unregistered source. Collection faults come back inside the result.
    pub async fn collect(&self, source: &str, topic: &str) -> Result<CollectionResult, DsError> {
        if source.trim().is_empty() || topic.trim().is_empty() {
            return Err(DsError::InvalidParams(
                "source and topic must both be given".into(),
            ));
        }
        let collector = self
            .get(source)
            .ok_or_else(|| DsError::UnknownSource(source.trim().to_string()))?;

        tracing::debug!(source = %collector.id(), topic, "dispatching");
        Ok(collector.collect(topic).await)
    }
}

fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
