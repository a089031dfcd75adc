use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-independent flight state, one per aircraft per poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub heading: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub last_seen: Option<i64>,
    pub source: String,
    pub flight_number: Option<String>,
    pub country_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub received: usize,
    pub published: usize,
    pub stored: usize,
    /// States rejected by normalization.
    pub skipped: usize,
    /// Normalized states that at least one sink failed to accept.
    pub failed: usize,
}
