use std::fmt;

use crate::plant_api::models::WindowSelector;

/// Absolute URL of one of the data service's reading collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAddress(String);

impl ResourceAddress {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps time windows onto the service's resource layout.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    base_url: String,
}

impl EndpointResolver {
    /// `base_url` is expected without a trailing slash, as produced by
    /// [`crate::config::normalize_base_url`].
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn resolve(&self, selector: WindowSelector) -> ResourceAddress {
        let path = match selector {
            WindowSelector::All => "/plantdata",
            WindowSelector::Last30Days => "/plantdata/month",
            WindowSelector::Last7Days => "/plantdata/week",
        };
        ResourceAddress(format!("{}{path}", self.base_url))
    }
}
