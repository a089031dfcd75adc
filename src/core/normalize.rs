use crate::domain::model::FlightState;
use crate::utils::error::{AgentError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

// OpenSky state vector layout:
// 0 icao24, 1 callsign, 2 origin_country, 3 time_position, 4 last_contact,
// 5 longitude, 6 latitude, 7 baro_altitude, 8 on_ground, 9 velocity,
// 10 true_track, 11 vertical_rate, 12 sensors, 13 geo_altitude, 14 squawk,
// 15 spi, 16 position_source
const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const ORIGIN_COUNTRY: usize = 2;
const TIME_POSITION: usize = 3;
const LAST_CONTACT: usize = 4;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;
const VERTICAL_RATE: usize = 11;
const GEO_ALTITUDE: usize = 13;

/// Every field up to `vertical_rate` must be present; `geo_altitude` onwards is optional.
pub const MIN_STATE_FIELDS: usize = VERTICAL_RATE + 1;

pub fn normalize_opensky_state(
    state: &Value,
    source: &str,
    received_at: DateTime<Utc>,
) -> Result<FlightState> {
    let fields = state.as_array().ok_or_else(|| AgentError::NormalizationError {
        message: format!("state vector is not an array: {}", state),
    })?;

    if fields.len() < MIN_STATE_FIELDS {
        return Err(AgentError::NormalizationError {
            message: format!(
                "state vector has {} fields, expected at least {}",
                fields.len(),
                MIN_STATE_FIELDS
            ),
        });
    }

    let icao24 = text(fields, ICAO24)
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AgentError::NormalizationError {
            message: "state vector has no icao24".to_string(),
        })?;

    let callsign = text(fields, CALLSIGN)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(FlightState {
        icao24,
        callsign,
        origin_country: text(fields, ORIGIN_COUNTRY).map(str::to_string),
        lat: number(fields, LATITUDE),
        lon: number(fields, LONGITUDE),
        // 0 counts as "no reading", falling through to the secondary field
        altitude: number(fields, BARO_ALTITUDE)
            .filter(|v| *v != 0.0)
            .or_else(|| number(fields, GEO_ALTITUDE)),
        velocity: number(fields, VELOCITY),
        heading: number(fields, TRUE_TRACK),
        vertical_rate: number(fields, VERTICAL_RATE),
        last_seen: integer(fields, TIME_POSITION)
            .filter(|v| *v != 0)
            .or_else(|| integer(fields, LAST_CONTACT)),
        source: source.to_string(),
        flight_number: None,
        country_name: None,
        received_at,
    })
}

fn text(fields: &[Value], index: usize) -> Option<&str> {
    fields.get(index).and_then(Value::as_str)
}

fn number(fields: &[Value], index: usize) -> Option<f64> {
    fields.get(index).and_then(Value::as_f64)
}

fn integer(fields: &[Value], index: usize) -> Option<i64> {
    fields.get(index).and_then(Value::as_i64)
}
