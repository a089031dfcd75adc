use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Failed to connect to Redis at {address}: {source}")]
    ConnectionError {
        address: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Redis command {command} failed: {message}")]
    CommandError { command: String, message: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cannot normalize flight state: {message}")]
    NormalizationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Connection,
    Command,
    Storage,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgentError {
    pub fn command(command: &str, err: redis::RedisError) -> Self {
        AgentError::CommandError {
            command: command.to_string(),
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AgentError::ConfigError { .. }
            | AgentError::MissingConfigError { .. }
            | AgentError::InvalidConfigValueError { .. }
            | AgentError::PortParseError { .. } => ErrorCategory::Configuration,
            AgentError::ConnectionError { .. } => ErrorCategory::Connection,
            AgentError::CommandError { .. } => ErrorCategory::Command,
            AgentError::DatabaseError(_) => ErrorCategory::Storage,
            AgentError::ApiError(_) => ErrorCategory::Network,
            AgentError::SerializationError(_) | AgentError::NormalizationError { .. } => {
                ErrorCategory::Data
            }
            AgentError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Connection
            | ErrorCategory::Command
            | ErrorCategory::Storage
            | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤類型給出修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AgentError::IoError(_) => "Check that the configuration file exists and is readable",
            AgentError::ConfigError { .. } => "Fix the syntax of the configuration file",
            AgentError::MissingConfigError { .. } => {
                "Add the missing key to the configuration file or export the referenced environment variable"
            }
            AgentError::InvalidConfigValueError { .. } => {
                "Correct the highlighted value in the configuration file"
            }
            AgentError::PortParseError { .. } => "Redis.Port must be an integer port number",
            AgentError::ConnectionError { .. } => {
                "Verify that Redis is running and that Redis.Host, Redis.User and Redis.Password are correct"
            }
            AgentError::CommandError { .. } => "Check the Redis server logs and the ACL of the configured user",
            AgentError::DatabaseError(_) => {
                "Verify Postgres.Url and that the database accepts connections"
            }
            AgentError::ApiError(_) => "Check network connectivity and the OpenSky endpoint",
            AgentError::SerializationError(_) => "The upstream payload is not the expected JSON shape",
            AgentError::NormalizationError { .. } => "The state vector was skipped; no action required",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Connection => format!("Could not reach Redis: {}", self),
            ErrorCategory::Command => format!("Redis rejected a command: {}", self),
            ErrorCategory::Storage => format!("Database problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
