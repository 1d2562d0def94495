//! Display formatting applied at render time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::plant_api::{Reading, WindowSelector};

/// X-axis tick label.
#[must_use]
pub fn tick_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Tooltip heading for a point.
#[must_use]
pub fn tooltip_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    /// Sample time
    pub x: DateTime<Utc>,
    /// Sensor value
    pub y: f64,
    /// Soil moisture in percent, shown alongside the raw value
    pub moisture_percent: i32,
    pub tick_label: String,
    pub tooltip_label: String,
}

impl From<&Reading> for ChartPoint {
    fn from(reading: &Reading) -> Self {
        Self {
            x: reading.timestamp,
            y: reading.value,
            moisture_percent: reading.moisture_percent(),
            tick_label: tick_label(reading.timestamp),
            tooltip_label: tooltip_label(reading.timestamp),
        }
    }
}

/// Line series in reading order.
#[must_use]
pub fn chart_points(readings: &[Reading]) -> Vec<ChartPoint> {
    readings.iter().map(ChartPoint::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WindowButton {
    pub selector: WindowSelector,
    /// Path segment for `POST /api/window/{selector}`
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// The window buttons with the current one marked active.
#[must_use]
pub fn window_buttons(current: WindowSelector) -> Vec<WindowButton> {
    WindowSelector::ALL
        .into_iter()
        .map(|selector| WindowButton {
            selector,
            slug: selector.slug().to_string(),
            label: selector.label().to_string(),
            active: selector == current,
        })
        .collect()
}
