use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OPENSKY_ENDPOINT: &str = "https://opensky-network.org/api/states/all";
pub const DEFAULT_CHANNEL: &str = "flights:realtime";

/// Settings document, `[Redis]` plus optional `[OpenSky]` and `[Postgres]` sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "Redis")]
    pub redis: RedisSettings,
    #[serde(rename = "OpenSky", default)]
    pub opensky: Option<OpenSkySettings>,
    #[serde(rename = "Postgres", default)]
    pub postgres: Option<PostgresSettings>,
}

/// Raw connection values as written in the file. `Port` stays a string
/// until [`ConnectionOptions`](crate::config::ConnectionOptions) parses it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedisSettings {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenSkySettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Flight persistence. Without this section the collector only publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostgresSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_endpoint() -> String {
    DEFAULT_OPENSKY_ENDPOINT.to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for OpenSkySettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_seconds: default_poll_interval(),
            channel: default_channel(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl AppSettings {
    /// 從檔案載入配置，`.json` 走 JSON，其餘一律當 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| AgentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        serde_json::from_str(&processed).map_err(|e| AgentError::ConfigError {
            message: format!("JSON parsing error: {}", e),
        })
    }

    pub fn opensky(&self) -> OpenSkySettings {
        self.opensky.clone().unwrap_or_default()
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are kept verbatim.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgentError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

impl Validate for RedisSettings {
    fn validate(&self) -> Result<()> {
        let host = validation::validate_required_field("Redis.Host", &self.host)?;
        validation::validate_non_empty_string("Redis.Host", host)?;
        validation::validate_required_field("Redis.Port", &self.port)?;
        validation::validate_required_field("Redis.User", &self.user)?;
        validation::validate_required_field("Redis.Password", &self.password)?;
        Ok(())
    }
}

impl Validate for OpenSkySettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("OpenSky.Endpoint", &self.endpoint)?;
        validation::validate_range("OpenSky.PollIntervalSeconds", self.poll_interval_seconds, 1, 3600)?;
        validation::validate_range("OpenSky.TimeoutSeconds", self.timeout_seconds, 1, 300)?;
        validation::validate_non_empty_string("OpenSky.Channel", &self.channel)?;
        Ok(())
    }
}

impl Validate for PostgresSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("Postgres.Url", &self.url)?;
        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(AgentError::InvalidConfigValueError {
                field: "Postgres.Url".to_string(),
                value: self.url.clone(),
                reason: "Expected a postgres:// or postgresql:// URL".to_string(),
            });
        }
        validation::validate_range("Postgres.MaxConnections", self.max_connections, 1, 100)?;
        Ok(())
    }
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        self.redis.validate()?;
        if let Some(opensky) = &self.opensky {
            opensky.validate()?;
        }
        if let Some(postgres) = &self.postgres {
            postgres.validate()?;
        }
        Ok(())
    }
}
