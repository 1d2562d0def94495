use reqwest::Client;

use crate::config::Config;
use crate::error::FetchError;
use crate::plant_api::models::Reading;
use crate::plant_api::{ReadingSource, ResourceAddress};

/// Most characters of an upstream body kept in errors and logs.
pub const BODY_PREVIEW_CHARS: usize = 500;

fn body_preview(text: &str) -> String {
    text.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// HTTP client for the plant data service.
pub struct PlantApiClient {
    http_client: Client,
}

impl PlantApiClient {
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http_client })
    }

    /// Get the readings stored at `address`.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::Unreachable` if the request could not be completed
    ///   (connection refused, DNS failure, timeout).
    /// - `ErrorKind::BadResponse` if the service returns a non-success status.
    /// - `ErrorKind::MalformedPayload` if the body is not an array of readings.
    pub async fn get_readings(&self, address: &ResourceAddress) -> Result<Vec<Reading>, FetchError> {
        tracing::debug!(url = %address, "Fetching readings");

        let response = self
            .http_client
            .get(address.as_str())
            .send()
            .await
            .map_err(|e| FetchError::unreachable(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::bad_response(
                status.as_u16(),
                format!(
                    "HTTP {}: {}",
                    status,
                    body_preview(&response.text().await.unwrap_or_default())
                ),
            ));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_decode() {
                FetchError::malformed(format!("Failed to decode response body: {e}"))
            } else {
                FetchError::unreachable(format!("Failed to get response text: {e}"))
            }
        })?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %address,
                body_preview = %body_preview(&text),
                "Failed to parse readings response"
            );
            FetchError::malformed(format!("Failed to parse response: {e}"))
        })
    }
}

impl ReadingSource for PlantApiClient {
    async fn fetch(&self, address: &ResourceAddress) -> Result<Vec<Reading>, FetchError> {
        self.get_readings(address).await
    }
}
