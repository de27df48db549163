//! wikisearch MCP server entry point
//!
//! Serves the Outline search tool over Streamable HTTP and legacy
//! HTTP+SSE.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wikisearch::core::config::{Config, LogFormat};
use wikisearch::core::services::Services;
use wikisearch::http::{router, AppState};
use wikisearch::mcp::SessionStore;

/// MCP server for searching an Outline wiki
#[derive(Parser, Debug)]
#[command(name = "wikisearch-mcp")]
#[command(version)]
#[command(about = "MCP server for Outline wiki search", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, env = "WIKISEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wikisearch=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn load_config(args: &Args) -> wikisearch::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

async fn shutdown_signal(sessions: Arc<SessionStore>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down, closing all sessions");
    sessions.close_all();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load configuration
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    init_logging(config.logging.format);

    tracing::info!("Starting wikisearch MCP server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    config.log_config();

    // Create shared services
    let services = Services::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("Failed to create services: {e}");
        std::process::exit(1);
    });

    let state = AppState::new(&services);
    let sessions = Arc::clone(&state.sessions);
    let app = router(state);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        eprintln!("Failed to bind {addr}: {e}");
        std::process::exit(1);
    });

    tracing::info!("Listening on {}", addr);
    tracing::info!("Streamable HTTP endpoint at http://{}/mcp", addr);
    tracing::info!("Legacy SSE endpoint at http://{}/sse", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sessions))
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
