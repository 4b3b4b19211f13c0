use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One day of traded volume.
///
/// Points from the chart fallback are kept as the upstream sent them: float or
/// integer timestamps, `null` volumes, and any extra keys survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    /// Unix timestamp in seconds
    pub x: Number,
    /// Volume for that day
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VolumePoint {
    pub fn new(timestamp_secs: i64, volume: f64) -> Self {
        Self {
            x: Number::from(timestamp_secs),
            y: Some(volume),
            extra: Map::new(),
        }
    }

    /// Build a point from a millisecond timestamp, truncating to whole seconds
    pub fn from_millis(timestamp_ms: f64, volume: f64) -> Self {
        Self::new((timestamp_ms / 1000.0) as i64, volume)
    }
}
