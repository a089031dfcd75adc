use crate::config::app_settings::RedisSettings;
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{self, Validate};
use url::Url;

/// Typed connection parameters derived from [`RedisSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub db: i64,
}

impl ConnectionOptions {
    /// Validates the raw settings and parses the port. Performs no I/O.
    pub fn from_settings(settings: &RedisSettings) -> Result<Self> {
        settings.validate()?;

        let host = validation::validate_required_field("Redis.Host", &settings.host)?;
        let raw_port = validation::validate_required_field("Redis.Port", &settings.port)?;
        let user = validation::validate_required_field("Redis.User", &settings.user)?;
        let password = validation::validate_required_field("Redis.Password", &settings.password)?;

        let port = raw_port
            .parse::<u16>()
            .map_err(|source| AgentError::PortParseError {
                value: raw_port.clone(),
                source,
            })?;

        Ok(Self {
            host: host.trim().to_string(),
            port,
            user: non_empty(resolved("Redis.User", user)?),
            password: non_empty(resolved("Redis.Password", password)?),
            db: settings.database.unwrap_or(0),
        })
    }

    /// `host:port`, as used in log lines and error messages.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Builds the `redis://` URL; credentials are percent-encoded by `url`.
    pub fn to_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("redis://{}/{}", self.address(), self.db)).map_err(|e| {
            AgentError::InvalidConfigValueError {
                field: "Redis.Host".to_string(),
                value: self.host.clone(),
                reason: format!("Cannot build connection URL: {}", e),
            }
        })?;

        if let Some(user) = &self.user {
            url.set_username(user)
                .map_err(|_| AgentError::InvalidConfigValueError {
                    field: "Redis.User".to_string(),
                    value: user.clone(),
                    reason: "User cannot be encoded in a connection URL".to_string(),
                })?;
        }

        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|_| AgentError::InvalidConfigValueError {
                    field: "Redis.Password".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "Password cannot be encoded in a connection URL".to_string(),
                })?;
        }

        Ok(url)
    }
}

/// A `${VAR}` left behind by substitution means the variable was never exported.
fn resolved<'a>(field_name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.starts_with("${") && trimmed.ends_with('}') {
        return Err(AgentError::MissingConfigError {
            field: format!("{} ({})", field_name, trimmed),
        });
    }
    Ok(value)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: &str) -> RedisSettings {
        RedisSettings {
            host: Some("localhost".to_string()),
            port: Some(port.to_string()),
            user: Some("default".to_string()),
            password: Some("p@ss:word".to_string()),
            database: None,
        }
    }

    #[test]
    fn test_parses_port() {
        let options = ConnectionOptions::from_settings(&settings("6379")).unwrap();
        assert_eq!(options.port, 6379);
        assert_eq!(options.address(), "localhost:6379");
        assert_eq!(options.db, 0);
    }

    #[test]
    fn test_non_numeric_port_is_port_parse_error() {
        match ConnectionOptions::from_settings(&settings("six-three-seven-nine")) {
            Err(AgentError::PortParseError { value, .. }) => assert_eq!(value, "six-three-seven-nine"),
            other => panic!("expected PortParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_port_needs_only_to_parse() {
        assert!(matches!(
            ConnectionOptions::from_settings(&settings("70000")),
            Err(AgentError::PortParseError { .. })
        ));
        assert!(matches!(
            ConnectionOptions::from_settings(&settings(" 6379")),
            Err(AgentError::PortParseError { .. })
        ));
        assert_eq!(ConnectionOptions::from_settings(&settings("0")).unwrap().port, 0);
    }

    #[test]
    fn test_unresolved_placeholder_is_missing_value() {
        let mut raw = settings("6379");
        raw.password = Some("${REDIS_PASSWORD_NEVER_EXPORTED}".to_string());

        match ConnectionOptions::from_settings(&raw) {
            Err(AgentError::MissingConfigError { field }) => {
                assert!(field.starts_with("Redis.Password"));
                assert!(field.contains("REDIS_PASSWORD_NEVER_EXPORTED"));
            }
            other => panic!("expected MissingConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_credentials_become_none() {
        let mut raw = settings("6379");
        raw.user = Some(String::new());
        raw.password = Some(String::new());

        let options = ConnectionOptions::from_settings(&raw).unwrap();
        assert_eq!(options.user, None);
        assert_eq!(options.password, None);
        assert_eq!(options.to_url().unwrap().as_str(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_url_encodes_credentials() {
        let options = ConnectionOptions::from_settings(&settings("6380")).unwrap();
        let url = options.to_url().unwrap();

        assert_eq!(url.username(), "default");
        assert_eq!(url.password(), Some("p%40ss%3Aword"));
        assert_eq!(url.port(), Some(6380));
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let mut raw = settings("6379");
        raw.host = Some("::1".to_string());

        let options = ConnectionOptions::from_settings(&raw).unwrap();
        assert_eq!(options.address(), "[::1]:6379");
        assert!(options.to_url().is_ok());
    }
}
