pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, CollectorCli};

pub use adapters::{OpenSkyClient, PostgresStore, RedisAccessor, RedisConnector, RedisHandle};
pub use config::{AppSettings, ConnectionOptions};
pub use crate::core::{accessor::ConnectionAccessor, collector::FlightCollector};
pub use utils::error::{AgentError, Result};
