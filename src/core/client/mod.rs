//! Public client surface + builder.
//! Defaults (UA, endpoints, request bounds) live in `constants`.

pub(crate) mod constants;

use crate::core::DsError;
use constants::{DEFAULT_COUNTRY_ISO3, DEFAULT_COUNTRY_M49, DEFAULT_COUNTRY_NAME, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The single country a client collects statistics for.
///
/// `iso3` feeds indicator API paths, `m49` is the UN numeric code used by
/// some portals, and `name` is written into every record's `Country` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub iso3: String,
    pub m49: String,
}

impl Country {
    pub fn new(name: impl Into<String>, iso3: impl Into<String>, m49: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iso3: iso3.into(),
            m49: m49.into(),
        }
    }

    /// Fill `{country}`, `{iso3}` and `{m49}` placeholders in a URL template.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{country}", &self.name.to_lowercase().replace(' ', "-"))
            .replace("{iso3}", &self.iso3)
            .replace("{m49}", &self.m49)
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_NAME, DEFAULT_COUNTRY_ISO3, DEFAULT_COUNTRY_M49)
    }
}

/// Shared HTTP client plus the target country.
///
/// Cloning is cheap: the underlying `reqwest::Client` is a pooled handle and
/// only read-only configuration (headers, timeouts) is shared.
#[derive(Debug, Clone)]
pub struct DsClient {
    http: Client,
    country: Country,
}

impl Default for DsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl DsClient {
    /// Create a new builder.
    pub fn builder() -> DsClientBuilder {
        DsClientBuilder::default()
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct DsClientBuilder {
    user_agent: Option<String>,
    country: Option<Country>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl DsClientBuilder {
    /// Override the User-Agent sent on every request.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Target a different country. Default: Zambia (`ZMB`, `894`).
    pub fn country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    ///
    /// Per-request bounds from each source profile still apply.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<DsClient, DsError> {
        let country = self.country.unwrap_or_default();
        if country.iso3.trim().is_empty() {
            return Err(DsError::Config("country iso3 code is empty".into()));
        }

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(DsClient {
            http: httpb.build()?,
            country,
        })
    }
}
