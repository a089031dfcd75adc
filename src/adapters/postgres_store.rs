use crate::config::PostgresSettings;
use crate::domain::model::FlightState;
use crate::domain::ports::FlightStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

const CREATE_CURRENT: &str = r#"
CREATE TABLE IF NOT EXISTS flights_current (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    icao24 VARCHAR(12) NOT NULL UNIQUE,
    callsign VARCHAR(32),
    flight_number VARCHAR(16),
    origin_country VARCHAR(128),
    lat DOUBLE PRECISION,
    lon DOUBLE PRECISION,
    altitude DOUBLE PRECISION,
    velocity DOUBLE PRECISION,
    heading DOUBLE PRECISION,
    vertical_rate DOUBLE PRECISION,
    last_seen BIGINT,
    source VARCHAR(32),
    country_name VARCHAR(128)
)"#;

const CREATE_HISTORY: &str = r#"
CREATE TABLE IF NOT EXISTS flights_history (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    icao24 VARCHAR(12) NOT NULL,
    timestamp BIGINT,
    lat DOUBLE PRECISION,
    lon DOUBLE PRECISION,
    altitude DOUBLE PRECISION,
    velocity DOUBLE PRECISION,
    source VARCHAR(32)
)"#;

const INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS flights_current_callsign_idx ON flights_current (callsign)",
    "CREATE INDEX IF NOT EXISTS flights_current_last_seen_idx ON flights_current (last_seen)",
    "CREATE INDEX IF NOT EXISTS flights_history_icao24_idx ON flights_history (icao24)",
    "CREATE INDEX IF NOT EXISTS flights_history_timestamp_idx ON flights_history (timestamp)",
];

// flight_number / country_name are left alone on update; no source fills them yet
const UPSERT_CURRENT: &str = r#"
INSERT INTO flights_current
    (icao24, callsign, flight_number, origin_country, lat, lon, altitude,
     velocity, heading, vertical_rate, last_seen, source, country_name)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
ON CONFLICT (icao24) DO UPDATE SET
    callsign = EXCLUDED.callsign,
    origin_country = EXCLUDED.origin_country,
    lat = EXCLUDED.lat,
    lon = EXCLUDED.lon,
    altitude = EXCLUDED.altitude,
    velocity = EXCLUDED.velocity,
    heading = EXCLUDED.heading,
    vertical_rate = EXCLUDED.vertical_rate,
    last_seen = EXCLUDED.last_seen,
    source = EXCLUDED.source"#;

const INSERT_HISTORY: &str = r#"
INSERT INTO flights_history (icao24, timestamp, lat, lon, altitude, velocity, source)
VALUES ($1, $2, $3, $4, $5, $6, $7)"#;

/// `flights_current` keeps the latest state per icao24, `flights_history`
/// gets one row per observation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(settings: &PostgresSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates both tables and their indexes if they do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CURRENT).execute(&self.pool).await?;
        sqlx::query(CREATE_HISTORY).execute(&self.pool).await?;
        for statement in INDEXES {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Postgres schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FlightStore for PostgresStore {
    async fn record(&self, flight: &FlightState) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(UPSERT_CURRENT)
            .bind(&flight.icao24)
            .bind(&flight.callsign)
            .bind(&flight.flight_number)
            .bind(&flight.origin_country)
            .bind(flight.lat)
            .bind(flight.lon)
            .bind(flight.altitude)
            .bind(flight.velocity)
            .bind(flight.heading)
            .bind(flight.vertical_rate)
            .bind(flight.last_seen)
            .bind(&flight.source)
            .bind(&flight.country_name)
            .execute(&mut *tx)
            .await?;

        sqlx::query(INSERT_HISTORY)
            .bind(&flight.icao24)
            .bind(flight.received_at.timestamp())
            .bind(flight.lat)
            .bind(flight.lon)
            .bind(flight.altitude)
            .bind(flight.velocity)
            .bind(&flight.source)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
