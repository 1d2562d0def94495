//! Generated readings for running the dashboard without a data service.

use chrono::{DateTime, Duration, Utc};

use crate::error::FetchError;
use crate::plant_api::models::{Reading, WindowSelector};
use crate::plant_api::{EndpointResolver, ReadingSource, ResourceAddress};

/// Number of daily samples in the generated history.
pub const DEMO_HISTORY_DAYS: i64 = 50;

/// Serves generated daily readings at the addresses the resolver produces.
pub struct MockReadingSource {
    resolver: EndpointResolver,
}

impl MockReadingSource {
    #[must_use]
    pub fn new(resolver: EndpointResolver) -> Self {
        Self { resolver }
    }
}

impl ReadingSource for MockReadingSource {
    async fn fetch(&self, address: &ResourceAddress) -> Result<Vec<Reading>, FetchError> {
        let selector = WindowSelector::ALL
            .into_iter()
            .find(|s| self.resolver.resolve(*s) == *address)
            .ok_or_else(|| FetchError::bad_response(404, format!("No demo data at {address}")))?;

        Ok(generate_readings(Utc::now(), selector))
    }
}

/// One reading per day ending at `now`, oldest first, limited to `selector`'s
/// window. Values lie in `20..=29` and are stable for a given calendar day.
#[must_use]
pub fn generate_readings(now: DateTime<Utc>, selector: WindowSelector) -> Vec<Reading> {
    let cutoff = selector.days().map(|days| now - Duration::days(days));

    (0..DEMO_HISTORY_DAYS)
        .rev()
        .map(|days_ago| {
            let timestamp = now - Duration::days(days_ago);
            Reading::new(demo_value(timestamp), timestamp)
        })
        .filter(|r| cutoff.is_none_or(|c| r.timestamp > c))
        .collect()
}

fn demo_value(timestamp: DateTime<Utc>) -> f64 {
    let day = timestamp.timestamp().div_euclid(86_400) as u64;
    let spread = (day.wrapping_mul(2_654_435_761) >> 16) % 10;
    20.0 + spread as f64
}
