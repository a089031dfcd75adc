use anyhow::Result;
use redis_flight_agent::config::RedisSettings;
use redis_flight_agent::core::smoke;
use redis_flight_agent::core::KeyValueStore;
use redis_flight_agent::{AgentError, AppSettings, ConnectionOptions, RedisAccessor, RedisConnector};
use std::io::Write;
use tempfile::Builder;

fn settings(host: &str, port: &str) -> RedisSettings {
    RedisSettings {
        host: Some(host.to_string()),
        port: Some(port.to_string()),
        user: Some(String::new()),
        password: Some(String::new()),
        database: None,
    }
}

/// Settings for a live server, overridable through REDIS_TEST_HOST / REDIS_TEST_PORT.
fn live_settings() -> RedisSettings {
    let host = std::env::var("REDIS_TEST_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("REDIS_TEST_PORT").unwrap_or_else(|_| "6379".to_string());
    settings(&host, &port)
}

#[tokio::test]
async fn test_non_numeric_port_fails_before_connecting() {
    // an unroutable host would hang if a connect were attempted
    let result = RedisAccessor::connect(RedisConnector, &settings("10.255.255.1", "sixty")).await;

    match result {
        Err(AgentError::PortParseError { value, .. }) => assert_eq!(value, "sixty"),
        Err(other) => panic!("expected PortParseError, got {}", other),
        Ok(_) => panic!("expected PortParseError, got a connection"),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    // nothing listens on port 1
    let result = RedisAccessor::connect(RedisConnector, &settings("127.0.0.1", "1")).await;

    match result {
        Err(AgentError::ConnectionError { address, .. }) => assert_eq!(address, "127.0.0.1:1"),
        Err(other) => panic!("expected ConnectionError, got {}", other),
        Ok(_) => panic!("expected ConnectionError, got a connection"),
    }
}

#[tokio::test]
async fn test_settings_file_to_connection_options() -> Result<()> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(
        br#"{ "Redis": { "Host": "127.0.0.1", "Port": "6390", "User": "svc", "Password": "pw" } }"#,
    )?;

    let settings = AppSettings::from_file(file.path())?;
    let accessor = RedisAccessor::lazy(RedisConnector, &settings.redis)?;

    assert!(!accessor.is_connected());
    assert_eq!(accessor.options().port, 6390);
    assert_eq!(accessor.options().user.as_deref(), Some("svc"));

    Ok(())
}

#[test]
fn test_shipped_settings_connect_without_auth() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/appsettings.toml");
    let settings = AppSettings::from_file(path)?;

    let options = ConnectionOptions::from_settings(&settings.redis)?;

    assert_eq!(options.address(), "localhost:6379");
    assert_eq!(options.user, None);
    assert_eq!(options.password, None);
    assert_eq!(options.to_url()?.as_str(), "redis://localhost:6379/0");

    Ok(())
}

#[test]
fn test_unexported_password_variable_is_reported() -> Result<()> {
    let settings = AppSettings::from_toml_str(
        r#"
[Redis]
Host = "localhost"
Port = "6379"
User = ""
Password = "${REDIS_CONNECTION_TEST_UNSET_PASSWORD}"
"#,
    )?;

    let err = ConnectionOptions::from_settings(&settings.redis).unwrap_err();
    assert!(matches!(err, AgentError::MissingConfigError { .. }));
    assert_eq!(err.exit_code(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_live_round_trip() -> Result<()> {
    let accessor = RedisAccessor::connect(RedisConnector, &live_settings()).await?;

    let first = accessor.handle().await?;
    let value = smoke::run_smoke_test(&first).await?;
    assert_eq!(smoke::format_smoke_line(&value), "Test value from Redis: bar");

    // a second handle sees the same data over the same connection
    let second = accessor.handle().await?;
    assert_eq!(second.get("foo").await?.as_deref(), Some("bar"));
    assert_eq!(second.ping().await?, "PONG");

    Ok(())
}
