use crate::core::normalize::normalize_opensky_state;
use crate::domain::model::{FlightState, PollSummary};
use crate::domain::ports::{FlightPublisher, FlightSource, FlightStore};
use crate::utils::error::Result;
use chrono::Utc;
use std::future::Future;
use std::time::Duration;

/// Polls a [`FlightSource`], normalizes every state vector, publishes
/// the result as JSON on a pub/sub channel and, when a [`FlightStore`]
/// is attached, persists it.
pub struct FlightCollector<S: FlightSource, P: FlightPublisher> {
    source: S,
    publisher: P,
    store: Option<Box<dyn FlightStore>>,
    channel: String,
    poll_interval: Duration,
}

impl<S: FlightSource, P: FlightPublisher> FlightCollector<S, P> {
    pub fn new(source: S, publisher: P, channel: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            source,
            publisher,
            store: None,
            channel: channel.into(),
            poll_interval,
        }
    }

    pub fn with_store(mut self, store: impl FlightStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// One fetch-normalize-publish-store cycle. Only a failed fetch fails
    /// the poll; per-state problems are logged and counted.
    pub async fn poll_once(&self) -> Result<PollSummary> {
        let states = self.source.fetch_states().await?;
        let received_at = Utc::now();
        let mut summary = PollSummary {
            received: states.len(),
            ..Default::default()
        };

        tracing::info!("{} returned {} states", self.source.name(), states.len());

        for state in &states {
            let flight = match normalize_opensky_state(state, self.source.name(), received_at) {
                Ok(flight) => flight,
                Err(e) => {
                    tracing::warn!("Skipping state: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            if !self.deliver(&flight, &mut summary).await {
                summary.failed += 1;
            }
        }

        tracing::debug!(
            "Poll finished: received={}, published={}, stored={}, skipped={}, failed={}",
            summary.received,
            summary.published,
            summary.stored,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    /// Hands one flight to every sink. Returns false if any of them failed.
    async fn deliver(&self, flight: &FlightState, summary: &mut PollSummary) -> bool {
        let mut delivered = true;

        match serde_json::to_string(flight) {
            Ok(payload) => match self.publisher.publish(&self.channel, &payload).await {
                Ok(_) => summary.published += 1,
                Err(e) => {
                    tracing::error!("Publish failed for {}: {}", flight.icao24, e);
                    delivered = false;
                }
            },
            Err(e) => {
                tracing::error!("Cannot encode {}: {}", flight.icao24, e);
                delivered = false;
            }
        }

        if let Some(store) = &self.store {
            match store.record(flight).await {
                Ok(()) => summary.stored += 1,
                Err(e) => {
                    tracing::error!("Store failed for {}: {}", flight.icao24, e);
                    delivered = false;
                }
            }
        }

        delivered
    }

    /// Polls until `shutdown` resolves. A failed poll is logged and the
    /// next one still runs after the usual interval.
    pub async fn run<F: Future<Output = ()>>(&self, shutdown: F) {
        tokio::pin!(shutdown);

        loop {
            if let Err(e) = self.poll_once().await {
                tracing::error!("Poll failed ({:?}): {}", e.category(), e);
            }

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down collector");
                    return;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}
