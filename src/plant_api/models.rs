use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Full-scale value of the soil moisture sensor's 12-bit ADC.
pub const MAX_READING_VALUE: f64 = 4096.0;

/// A single soil moisture sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawReading")]
pub struct Reading {
    /// Database id; absent for generated readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<i64>,
    /// Raw sensor value
    pub value: f64,
    /// When the sample was measured
    pub timestamp: DateTime<Utc>,
    /// Moisture percentage as computed by the service, if it sent one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<i32>,
}

impl Reading {
    #[must_use]
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            identifier: None,
            value,
            timestamp,
            percentage: None,
        }
    }

    /// Moisture percentage: the service-provided figure when present,
    /// otherwise derived from the raw value against the ADC range.
    #[must_use]
    pub fn moisture_percent(&self) -> i32 {
        self.percentage
            .unwrap_or_else(|| (self.value / MAX_READING_VALUE * 100.0) as i32)
    }
}

/// Wire shape of a reading.
///
/// The data service serializes its entity as `{id, reading, date, percentage}`
/// with zone-less local timestamps; the canonical form is
/// `{identifier, value, timestamp}`. Both are accepted.
#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(default, alias = "id")]
    identifier: Option<i64>,
    #[serde(alias = "reading")]
    value: f64,
    #[serde(alias = "date")]
    timestamp: String,
    #[serde(default)]
    percentage: Option<i32>,
}

impl TryFrom<RawReading> for Reading {
    type Error = String;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        Ok(Self {
            identifier: raw.identifier,
            value: raw.value,
            timestamp: parse_timestamp(&raw.timestamp)?,
            percentage: raw.percentage,
        })
    }
}

/// Parse an ISO 8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{s}'"))
}

/// Time window shown on the chart.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum WindowSelector {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "LAST_30_DAYS")]
    Last30Days,
    #[serde(rename = "LAST_7_DAYS")]
    Last7Days,
}

impl WindowSelector {
    /// All selectors in button order.
    pub const ALL: [Self; 3] = [Self::All, Self::Last30Days, Self::Last7Days];

    /// Short slug used in presentation API paths.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last30Days => "30d",
            Self::Last7Days => "7d",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Last30Days => "Last 30D",
            Self::Last7Days => "Last 7D",
        }
    }

    /// Number of days covered by the window, `None` for the full history.
    #[must_use]
    pub fn days(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Last30Days => Some(30),
            Self::Last7Days => Some(7),
        }
    }
}

impl fmt::Display for WindowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "ALL",
            Self::Last30Days => "LAST_30_DAYS",
            Self::Last7Days => "LAST_7_DAYS",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown time window '{0}' (expected all, 30d or 7d)")]
pub struct UnknownWindow(pub String);

impl FromStr for WindowSelector {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "30d" | "month" | "last_30_days" => Ok(Self::Last30Days),
            "7d" | "week" | "last_7_days" => Ok(Self::Last7Days),
            _ => Err(UnknownWindow(s.to_string())),
        }
    }
}
