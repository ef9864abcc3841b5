//! Health check endpoints

use crate::amqp::{AmqpPublisher, GatewayState, PublisherStats};
use crate::metrics::PublisherMetrics;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub state: GatewayState,
    pub exchange: String,
    #[serde(flatten)]
    pub stats: PublisherStats,
}

impl ReadyResponse {
    pub fn from_publisher(publisher: &AmqpPublisher) -> Self {
        let state = publisher.state();
        Self {
            ready: state.accepts_publishes(),
            state,
            exchange: publisher.exchange().to_string(),
            stats: publisher.stats(),
        }
    }
}

/// Application state for health endpoints
#[derive(Clone)]
pub struct AppState {
    pub publisher: AmqpPublisher,
    pub metrics: Arc<PublisherMetrics>,
}

/// Create the health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health endpoint - always returns 200 if process is running
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness endpoint - returns 200 only while the broker link is open
async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = ReadyResponse::from_publisher(&state.publisher);

    if response.ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Metrics endpoint - returns Prometheus format metrics
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    crate::metrics::set_broker_connected(state.publisher.is_open());

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
    }

    #[test]
    fn test_ready_response_flattens_stats() {
        let response = ReadyResponse {
            ready: false,
            state: GatewayState::Reconnecting,
            exchange: "auth.events".to_string(),
            stats: PublisherStats {
                messages_published: 7,
                publish_failures: 1,
                reconnects: 1,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["state"], "reconnecting");
        assert_eq!(json["messages_published"], 7);
        assert_eq!(json["reconnects"], 1);
    }
}
