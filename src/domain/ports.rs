use crate::config::ConnectionOptions;
use crate::domain::model::FlightState;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Opens the one underlying connection. The returned value is a cheap,
/// cloneable handle; every clone talks over the same connection.
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync;

    fn connect(
        &self,
        options: &ConnectionOptions,
    ) -> impl std::future::Future<Output = Result<Self::Handle>> + Send;
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait FlightPublisher: Send + Sync {
    /// Returns the number of subscribers that received the message.
    async fn publish(&self, channel: &str, payload: &str) -> Result<u64>;
}

/// Durable flight storage: latest state per aircraft plus an observation log.
#[async_trait]
pub trait FlightStore: Send + Sync {
    async fn record(&self, flight: &FlightState) -> Result<()>;
}

#[async_trait]
pub trait FlightSource: Send + Sync {
    fn name(&self) -> &str;

    /// Raw positional state vectors, one JSON array per aircraft.
    async fn fetch_states(&self) -> Result<Vec<serde_json::Value>>;
}
