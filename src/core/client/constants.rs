//! Centralized constants for default endpoints, UA and request bounds.

/// Default desktop UA to avoid trivial bot blocking on statistics portals.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/120.0.0.0 Safari/537.36"
);

/// World Bank indicators API base (country and indicator segments are appended).
pub(crate) const DEFAULT_WORLD_BANK_API: &str = "https://api.worldbank.org/v2/";

/// Seconds allowed for a single indicator request.
pub(crate) const DEFAULT_API_TIMEOUT_SECS: u64 = 15;

/// Seconds allowed for a single HTML page request.
pub(crate) const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 10;

/// Pause between consecutive indicator requests.
pub(crate) const DEFAULT_API_DELAY_MS: u64 = 500;

/// Year range requested from indicator APIs.
pub(crate) const DEFAULT_DATE_RANGE: &str = "2015:2023";

/// Page size requested from indicator APIs.
pub(crate) const DEFAULT_PER_PAGE: u32 = 50;

/// Upper bound on records emitted by the structured scrape pass per page.
pub(crate) const DEFAULT_MAX_STRUCTURED: usize = 10;

/// Upper bound on matches kept per free-text pattern.
pub(crate) const DEFAULT_MAX_PER_PATTERN: usize = 3;

/// Country targeted when none is configured.
pub(crate) const DEFAULT_COUNTRY_NAME: &str = "Zambia";
pub(crate) const DEFAULT_COUNTRY_ISO3: &str = "ZMB";
pub(crate) const DEFAULT_COUNTRY_M49: &str = "894";
