// Adapters layer: concrete implementations of the domain ports.

pub mod opensky;
pub mod postgres_store;
pub mod redis_store;

pub use opensky::OpenSkyClient;
pub use postgres_store::PostgresStore;
pub use redis_store::{RedisAccessor, RedisConnector, RedisHandle};
