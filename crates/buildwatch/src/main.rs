use anyhow::Context;
use buildwatch_core::{
    ConfigLoader,
    CoreContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    buildwatch_core::logging::init();

    let config_path = ConfigLoader::discover_config_path();
    tracing::info!(path = %config_path.display(), "Loading configuration");

    let config = ConfigLoader::load_validated(&config_path)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    let mut monitor = CoreContext::from_config(&config)?.into_monitor();
    monitor.run(shutdown_signal()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
