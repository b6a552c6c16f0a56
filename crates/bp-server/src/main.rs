use std::sync::Arc;

use anyhow::Context;
use bp_config::BrightConfig;
use bp_db::SchoolService;
use bp_llm::LlmClient;
use bp_server::cli::Cli;
use bp_server::{AppState, build_router};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("brightpath error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BrightConfig::load_with_dotenv().context("failed to load configuration")?;
    cli.apply(&mut config);
    init_tracing(cli.log_level(&config.server.log_level))?;

    let service = SchoolService::connect(&config.database, &config.school)
        .await
        .context("failed to open database")?;
    let completer = LlmClient::from_config(&config.llm).context("failed to build LLM client")?;
    let state = AppState::new(service, Arc::new(completer), &config.server);
    let app = build_router(state);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(bind = %config.server.bind, "brightpath listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;
    tracing::info!("brightpath stopped");
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BRIGHTPATH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received, draining connections");
}
