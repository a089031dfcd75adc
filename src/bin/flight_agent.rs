use clap::Parser;
use redis_flight_agent::utils::{logger, validation::Validate};
use redis_flight_agent::{
    AgentError, AppSettings, CollectorCli, FlightCollector, OpenSkyClient, PostgresStore,
    RedisAccessor, RedisConnector, Result,
};
use std::time::Duration;

fn exit_with(e: AgentError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

async fn run(args: &CollectorCli) -> Result<()> {
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let settings = AppSettings::from_file(&args.config)?;
    settings.validate()?;
    let opensky = settings.opensky();
    opensky.validate()?;

    tracing::info!("Connecting to Redis...");
    let accessor = RedisAccessor::connect(RedisConnector, &settings.redis).await?;
    let handle = accessor.handle().await?;
    let pong = handle.ping().await?;
    tracing::debug!("Redis answered {}", pong);

    let source = OpenSkyClient::new(&opensky)?;
    let mut collector = FlightCollector::new(
        source,
        handle,
        opensky.channel.clone(),
        Duration::from_secs(opensky.poll_interval_seconds),
    );

    // 初始化資料庫
    if let Some(postgres) = &settings.postgres {
        tracing::info!("Initializing Postgres...");
        let store = PostgresStore::connect(postgres).await?;
        store.init_schema().await?;
        collector = collector.with_store(store);
    } else {
        tracing::info!("No [Postgres] section, flights are only published");
    }

    tracing::info!(
        "Publishing to '{}' every {}s",
        collector.channel(),
        opensky.poll_interval_seconds
    );

    if args.once {
        let summary = collector.poll_once().await?;
        println!(
            "Published {} and stored {} of {} states ({} skipped, {} failed)",
            summary.published, summary.stored, summary.received, summary.skipped, summary.failed
        );
        return Ok(());
    }

    collector
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = CollectorCli::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting flight agent");

    if let Err(e) = run(&args).await {
        exit_with(e);
    }
}
