use clap::Parser;
use redis_flight_agent::core::smoke;
use redis_flight_agent::utils::{logger, validation::Validate};
use redis_flight_agent::{AppSettings, CliConfig, RedisAccessor, RedisConnector, Result};

async fn run(config: &CliConfig) -> Result<String> {
    tracing::info!("📁 Loading configuration from: {}", config.config);
    let settings = AppSettings::from_file(&config.config)?;
    // 只檢查 [Redis]，其他區段屬於 flight_agent
    settings.redis.validate()?;

    // 啟動階段就建立連線，之後只傳遞 accessor
    let accessor = RedisAccessor::connect(RedisConnector, &settings.redis).await?;
    let handle = accessor.handle().await?;

    let value = smoke::run_smoke_test(&handle).await?;
    Ok(smoke::format_smoke_line(&value))
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting redis-flight-agent smoke test");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(line) => {
            tracing::info!("✅ Round trip succeeded");
            println!("{}", line);
        }
        Err(e) => {
            tracing::error!(
                "❌ Smoke test failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
