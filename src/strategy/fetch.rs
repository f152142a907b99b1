//! Indicator API step.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use super::{AttemptFuture, Harvest, Strategy, wire};
use crate::core::{DsClient, DsError, Topic, net};
use crate::sources::{ApiConfig, SourceProfile};

/// Fetches every catalog indicator for a topic, one request at a time.
///
/// A failed, timed-out or malformed indicator is logged and skipped; the
/// step yields nothing only when no indicator produced a single observation.
pub struct FetchStrategy {
    client: DsClient,
    profile: Arc<SourceProfile>,
    api: ApiConfig,
    base: Url,
}

impl FetchStrategy {
    /// # Errors
    ///
    /// Returns `DsError::Config` if the profile has no API section and
    /// `DsError::Url` if its base URL does not parse.
    pub fn new(client: &DsClient, profile: Arc<SourceProfile>) -> Result<Self, DsError> {
        let api = profile.api.clone().ok_or_else(|| {
            DsError::Config(format!("source `{}` has no API configuration", profile.id))
        })?;

        let mut raw = api.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)?;

        Ok(Self {
            client: client.clone(),
            profile,
            api,
            base,
        })
    }

    fn indicator_url(&self, code: &str) -> Result<Url, DsError> {
        let iso3 = &self.client.country().iso3;
        let mut url = self
            .base
            .join(&format!("country/{iso3}/indicator/{code}"))?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("date", &self.api.date_range)
            .append_pair("per_page", &self.api.per_page.to_string());
        Ok(url)
    }

    async fn run(&self, topic: &Topic) -> Result<Option<Harvest>, DsError> {
        let indicators = self.profile.catalog.indicators(topic);
        if indicators.is_empty() {
            debug!(source = %self.profile.id, %topic, "no catalog indicators for topic");
            return Ok(None);
        }

        let country = self.client.country();
        let label = self.profile.api_label();
        let delay = self.api.delay();
        let mut records = Vec::new();
        let mut with_data = 0usize;

        for (i, indicator) in indicators.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let url = self.indicator_url(&indicator.code)?;
            let body = match net::get_text(&self.client, &url, self.api.timeout()).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        source = %self.profile.id,
                        indicator = %indicator.code,
                        error = %e,
                        "indicator request failed; skipping"
                    );
                    continue;
                }
            };

            let observations = match wire::decode_observations(&body) {
                Ok(obs) => obs,
                Err(e) => {
                    warn!(
                        source = %self.profile.id,
                        indicator = %indicator.code,
                        error = %e,
                        "indicator payload unusable; skipping"
                    );
                    continue;
                }
            };

            let before = records.len();
            records.extend(
                observations
                    .into_iter()
                    .filter_map(|obs| obs.into_record(indicator, country, &label)),
            );
            if records.len() > before {
                with_data += 1;
            }
            debug!(
                indicator = %indicator.code,
                added = records.len() - before,
                "indicator decoded"
            );
        }

        if records.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            Harvest::new(records)
                .with_param("indicators_requested", indicators.len())
                .with_param("indicators_with_data", with_data)
                .with_param("date_range", self.api.date_range.clone()),
        ))
    }
}

impl Strategy for FetchStrategy {
    fn attempt<'a>(&'a self, topic: &'a Topic) -> AttemptFuture<'a> {
        Box::pin(self.run(topic))
    }
}
