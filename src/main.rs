use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use translation_relay::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translation_relay=debug,tower_http=debug")),
        )
        .init();

    let lookup = |key: &str| std::env::var(key).ok();

    let (mut config, loaded_path) = Config::discover(lookup)?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }
    config.apply_env_overrides(lookup)?;
    config.validate()?;

    if !config.provider_config.has_credential() {
        warn!("No provider credential configured (set HF_TOKEN); translations will fail");
    }
    info!(
        "Provider: model={}, provider={}, base_url={}",
        config.provider_config.model, config.provider_config.provider, config.provider_config.base_url
    );

    let addr = config.bind_addr();
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("API ready on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
