//! Personal Platform: HTTP entry point.
//!
//! Parses arguments, initializes tracing, loads configuration (TOML file plus
//! the `PORT` environment override), builds the router and serves it until a
//! shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use personal_platform::config::{AppConfig, DEFAULT_LOG_FILTER};
use personal_platform::{create_router, start_server};

/// Personal Platform: health, service descriptor and generation request API
#[derive(Parser, Debug)]
#[command(name = "personal-platform", version, about)]
struct Args {
    /// Path to configuration file (default: config/default.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "personal_platform=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration first: it decides the log format
    let config = AppConfig::load(args.config.as_deref())?;

    // Log filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let fmt_layer = if config.logging.is_json() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(fmt_layer)
        .init();

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        static_dir = %config.static_files.dir,
        log_format = %config.logging.format,
        "Loaded configuration"
    );

    let app = create_router(&config);
    start_server(app, &config.http).await?;

    Ok(())
}
