use clap::Parser;

/// Flags for the smoke-test binary. Both are optional; running with no
/// arguments reads `appsettings.toml` from the working directory.
#[derive(Debug, Clone, Parser)]
#[command(name = "redis-flight-agent")]
#[command(about = "Connects to Redis, writes foo=bar and reads it back")]
pub struct CliConfig {
    /// Path to the settings file (TOML, or JSON when it ends in .json)
    #[arg(short, long, default_value = "appsettings.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Flags for the `flight_agent` collector.
#[derive(Debug, Clone, Parser)]
#[command(name = "flight_agent")]
#[command(about = "Polls OpenSky and publishes normalized flight states to Redis")]
pub struct CollectorCli {
    /// Path to the settings file (TOML, or JSON when it ends in .json)
    #[arg(short, long, default_value = "appsettings.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Run a single poll and exit
    #[arg(long)]
    pub once: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
