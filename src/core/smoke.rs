use crate::domain::ports::KeyValueStore;
use crate::utils::error::{AgentError, Result};

pub const SMOKE_KEY: &str = "foo";
pub const SMOKE_VALUE: &str = "bar";

/// Writes `foo` = `bar`, reads it back and returns what the store answered.
pub async fn run_smoke_test<S: KeyValueStore + ?Sized>(store: &S) -> Result<String> {
    tracing::debug!("SET {} {}", SMOKE_KEY, SMOKE_VALUE);
    store.set(SMOKE_KEY, SMOKE_VALUE).await?;

    tracing::debug!("GET {}", SMOKE_KEY);
    let value = store.get(SMOKE_KEY).await?.ok_or_else(|| AgentError::CommandError {
        command: "GET".to_string(),
        message: format!("key '{}' was not found right after SET", SMOKE_KEY),
    })?;

    if value != SMOKE_VALUE {
        tracing::warn!("Read back '{}' for '{}', expected '{}'", value, SMOKE_KEY, SMOKE_VALUE);
    }

    Ok(value)
}

pub fn format_smoke_line(value: &str) -> String {
    format!("Test value from Redis: {}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        data: Mutex<HashMap<String, String>>,
        drop_writes: bool,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn set(&self, key: &str, value: &str) -> Result<()> {
            if !self.drop_writes {
                self.data.lock().await.insert(key.to_string(), value.to_string());
            }
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.data.lock().await.get(key).cloned())
        }
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::default();

        let value = tokio_test::block_on(run_smoke_test(&store)).unwrap();

        assert_eq!(value, "bar");
        assert_eq!(format_smoke_line(&value), "Test value from Redis: bar");
    }

    #[tokio::test]
    async fn test_missing_value_is_command_error() {
        let store = MemoryStore {
            drop_writes: true,
            ..Default::default()
        };

        let result = run_smoke_test(&store).await;
        assert!(matches!(result, Err(AgentError::CommandError { .. })));
    }
}
