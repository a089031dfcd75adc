use crate::config::{ConnectionOptions, RedisSettings};
use crate::domain::ports::Connector;
use crate::utils::error::Result;
use tokio::sync::OnceCell;

/// Owns the single shared connection to the store.
///
/// The connection is opened at most once per accessor, guarded by a
/// [`OnceCell`], so concurrent first callers share one connect attempt.
/// Every call to [`handle`](Self::handle) returns a clone bound to that
/// same connection.
pub struct ConnectionAccessor<C: Connector> {
    connector: C,
    options: ConnectionOptions,
    connection: OnceCell<C::Handle>,
}

impl<C: Connector> ConnectionAccessor<C> {
    /// Parses the settings without touching the network. A bad port fails here.
    pub fn lazy(connector: C, settings: &RedisSettings) -> Result<Self> {
        let options = ConnectionOptions::from_settings(settings)?;
        Ok(Self {
            connector,
            options,
            connection: OnceCell::new(),
        })
    }

    /// Startup-phase construction: the connection is open when this returns.
    pub async fn connect(connector: C, settings: &RedisSettings) -> Result<Self> {
        let accessor = Self::lazy(connector, settings)?;
        accessor.handle().await?;
        tracing::info!("Connected to Redis at {}", accessor.options.address());
        Ok(accessor)
    }

    pub async fn handle(&self) -> Result<C::Handle> {
        let handle = self
            .connection
            .get_or_try_init(|| {
                tracing::debug!("Opening Redis connection to {}", self.options.address());
                self.connector.connect(&self.options)
            })
            .await?;
        Ok(handle.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }
}
