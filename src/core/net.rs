use std::time::Duration;

use url::Url;

use crate::core::{DsClient, DsError};

/// Issue one bounded GET and return the body as text.
///
/// Non-2xx responses become [`DsError::Status`]; the caller decides whether
/// that is fatal (it never is for strategies).
pub(crate) async fn get_text(
    client: &DsClient,
    url: &Url,
    timeout: Duration,
) -> Result<String, DsError> {
    tracing::debug!(%url, timeout_ms = timeout.as_millis() as u64, "GET");

    let resp = client
        .http()
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(DsError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let text = resp.text().await?;
    tracing::debug!(%url, bytes = text.len(), "response body read");
    Ok(text)
}
