use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plant_monitor::common::AppState;
use plant_monitor::config::Config;
use plant_monitor::plant_api::{EndpointResolver, MockReadingSource, PlantApiClient, ReadingSource};
use plant_monitor::routes;
use plant_monitor::view::{ViewHandle, ViewRuntime};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,plant_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting plant-monitor...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        base_url = %config.plant_api_base_url,
        timeout_secs = config.request_timeout_seconds,
        dummy_data = config.use_dummy_data,
        "Configuration loaded"
    );

    let resolver = EndpointResolver::new(config.plant_api_base_url.clone());

    // Start the view runtime; it issues the initial fetch itself
    let view = if config.use_dummy_data {
        tracing::warn!("Running in demo mode with generated readings");
        spawn_view(MockReadingSource::new(resolver.clone()), resolver)
    } else {
        spawn_view(PlantApiClient::new(&config)?, resolver)
    };

    let state = AppState::new(view);

    // Build router
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn spawn_view<S: ReadingSource>(source: S, resolver: EndpointResolver) -> ViewHandle {
    let (runtime, handle) = ViewRuntime::new(Arc::new(source), resolver);
    tokio::spawn(runtime.run());
    handle
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
