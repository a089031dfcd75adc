use crate::utils::error::{AgentError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AgentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AgentError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("OpenSky.Endpoint", "https://opensky-network.org/api/states/all").is_ok());
        assert!(validate_url("OpenSky.Endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("OpenSky.Endpoint", "").is_err());
        assert!(validate_url("OpenSky.Endpoint", "not a url").is_err());
        assert!(validate_url("OpenSky.Endpoint", "redis://localhost").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("localhost".to_string());
        let missing: Option<String> = None;

        assert_eq!(validate_required_field("Redis.Host", &present).unwrap(), "localhost");
        assert!(matches!(
            validate_required_field("Redis.Host", &missing),
            Err(AgentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("Redis.Host", "cache.internal").is_ok());
        assert!(validate_non_empty_string("Redis.Host", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("OpenSky.PollIntervalSeconds", 5u64, 1, 3600).is_ok());
        assert!(validate_range("OpenSky.PollIntervalSeconds", 0u64, 1, 3600).is_err());
    }
}
