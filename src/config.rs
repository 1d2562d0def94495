use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Plant data service
    pub plant_api_base_url: String,
    pub request_timeout_seconds: u64,
    pub use_dummy_data: bool,

    // Presentation API
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `PLANT_API_BASE_URL` is not set, or
    /// `ConfigError::Invalid` if it is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("PLANT_API_BASE_URL")
            .map_err(|_| ConfigError::Missing("PLANT_API_BASE_URL"))?;

        Ok(Self {
            plant_api_base_url: normalize_base_url(&base_url)?,
            request_timeout_seconds: env::var("PLANT_REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            use_dummy_data: env::var("PLANT_USE_DUMMY_DATA")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Validate the service base address and strip trailing slashes so that
/// resource paths can be appended verbatim.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for anything that is not an absolute
/// `http` or `https` URL with a host.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        name: "PLANT_API_BASE_URL",
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid {
            name: "PLANT_API_BASE_URL",
            reason: format!("expected an http(s) URL, got '{trimmed}'"),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
