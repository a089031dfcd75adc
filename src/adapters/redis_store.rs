use crate::config::ConnectionOptions;
use crate::core::accessor::ConnectionAccessor;
use crate::domain::ports::{Connector, FlightPublisher, KeyValueStore};
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

pub type RedisAccessor = ConnectionAccessor<RedisConnector>;

/// Opens a multiplexed async connection with the `redis` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

impl Connector for RedisConnector {
    type Handle = RedisHandle;

    async fn connect(&self, options: &ConnectionOptions) -> Result<RedisHandle> {
        let url = options.to_url()?;
        let connection_error = |source| AgentError::ConnectionError {
            address: options.address(),
            source,
        };

        let client = redis::Client::open(url.as_str()).map_err(connection_error)?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(connection_error)?;

        Ok(RedisHandle { connection })
    }
}

/// Request-scoped command handle. Clones share the underlying connection.
#[derive(Clone)]
pub struct RedisHandle {
    connection: MultiplexedConnection,
}

impl RedisHandle {
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.connection.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AgentError::command("PING", e))?;
        Ok(pong)
    }
}

#[async_trait]
impl KeyValueStore for RedisHandle {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| AgentError::command("SET", e))
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| AgentError::command("GET", e))
    }
}

#[async_trait]
impl FlightPublisher for RedisHandle {
    async fn publish(&self, channel: &str, payload: &str) -> Result<u64> {
        let mut conn = self.connection.clone();
        conn.publish::<_, _, u64>(channel, payload)
            .await
            .map_err(|e| AgentError::command("PUBLISH", e))
    }
}
