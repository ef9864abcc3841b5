//! Auth event gateway service
//!
//! Connects the publisher, serves health/ready/metrics, and closes the
//! broker link on shutdown. A publisher that cannot be constructed is fatal
//! for this process: it exits non-zero instead of running degraded.

use anyhow::Result;
use auth_event_gateway::amqp::AmqpPublisher;
use auth_event_gateway::config::GatewayConfig;
use auth_event_gateway::health::{self, AppState};
use auth_event_gateway::metrics::PublisherMetrics;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get log level
    let gateway_config = GatewayConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("auth_event_gateway={}", gateway_config.log_level).parse()?)
                .add_directive("lapin=warn".parse()?),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        exchange = %gateway_config.exchange,
        "Starting auth event gateway"
    );

    let metrics = Arc::new(PublisherMetrics::install()?);

    let publisher = match AmqpPublisher::connect(gateway_config.publisher_settings()).await {
        Ok(publisher) => publisher,
        Err(e) => {
            error!(error = %e, error_type = e.error_type_label(), "Broker unavailable at startup");
            return Err(e.into());
        }
    };

    let served = serve(&gateway_config, publisher.clone(), metrics).await;

    // close on every exit path, including a failed HTTP server
    info!("Shutting down gateway...");
    publisher.close().await;
    info!("Gateway shutdown complete");

    served
}

async fn serve(
    config: &GatewayConfig,
    publisher: AmqpPublisher,
    metrics: Arc<PublisherMetrics>,
) -> Result<()> {
    let router = health::router(AppState { publisher, metrics });
    let addr: SocketAddr = ([0, 0, 0, 0], config.http_port).into();

    info!(port = config.http_port, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        result = axum::serve(listener, router) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e.into());
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => warn!(error = %e, "Signal handler failed; shutting down"),
            }
        }
    }
    Ok(())
}

/// Wait for SIGTERM or SIGINT
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await
    }
}
