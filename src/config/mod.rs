pub mod app_settings;
#[cfg(feature = "cli")]
pub mod cli;
pub mod options;

pub use app_settings::{AppSettings, OpenSkySettings, PostgresSettings, RedisSettings};
pub use options::ConnectionOptions;
