mod args;
mod di;
mod routes;

use crate::args::SourceArgs;
use crate::di::create_app_module;
use clap::{ArgAction, Parser};
use hygiene_application::QueryService;
use shaku::HasComponent;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "hygiene")]
#[command(about = "Serve food hygiene rating breakdowns per local authority", long_about = None)]
struct Cli {
    /// Listen address for the query API
    #[arg(long, default_value = "0.0.0.0:8080")]
    api: String,

    /// Use cached results for better responsiveness
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    cache: bool,

    /// Debug logging
    #[arg(long)]
    debug: bool,

    /// Directory served under /ui
    #[arg(long)]
    ui_dir: Option<PathBuf>,

    #[command(flatten)]
    source: SourceArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        base_url = %cli.source.base_url,
        api_version = cli.source.api_version,
        cache = cli.cache,
        "Starting food hygiene query service"
    );

    let module = create_app_module(&cli.source.to_config(), cli.cache)?;
    let service: Arc<dyn QueryService> = module.resolve();

    let app = routes::app_router(service, cli.ui_dir);

    let listener = TcpListener::bind(&cli.api).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal, stopping gracefully...");
    }
}
