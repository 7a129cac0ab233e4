use std::io::stderr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use sales_query_engine::api::{self, AppState};
use sales_query_engine::config::{Config, DataSourceConfig};
use sales_query_engine::service::SalesQuery;
use sales_query_engine::storage::{MemorySource, RecordSource, SqliteSource};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    setup_logging(parse_log_level(&config.log_level));

    let source: Arc<dyn RecordSource> = match &config.data_source {
        DataSourceConfig::Csv(path) => {
            info!("Serving sales from CSV [{}]", path.display());
            Arc::new(MemorySource::from_csv(path.clone()))
        }
        DataSourceConfig::Sqlite { url, max_connections } => {
            info!("Serving sales from SQLite [{url}]");
            Arc::new(SqliteSource::connect(url, *max_connections).await.context("failed to open sales database")?)
        }
    };

    let sales = SalesQuery::new(source, config.filter_options_ttl);

    //NOTE: The dataset loads lazily, this triggers the first load in the background.
    let warm_up = sales.clone();
    tokio::spawn(async move {
        match warm_up.health().await {
            Ok(records) => info!("Sales data ready with {records} records"),
            Err(error) => warn!("Sales data not available yet: {error}")
        }
    });

    let app = api::router(AppState { sales, page_limits: config.page_limits });
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await.with_context(|| format!("failed to bind {address}"))?;

    info!("Listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down");

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {error}");
        std::future::pending::<()>().await;
    }
}
