//! Health check and metrics endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub bot_username: Option<String>,
}

/// Pipeline counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub messages_received: u64,
    pub replies_delivered: u64,
    pub rejections: u64,
    pub completion_errors: u64,
    pub commands_processed: u64,
    pub active_sessions: usize,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<RwLock<Metrics>>,
    pub start_time: SystemTime,
    pub bot_username: Option<String>,
}

impl AppState {
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            metrics: Arc::new(RwLock::new(Metrics::default())),
            start_time: SystemTime::now(),
            bot_username,
        }
    }

    pub async fn increment_messages_received(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.messages_received += 1;
    }

    pub async fn increment_replies_delivered(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.replies_delivered += 1;
    }

    pub async fn increment_rejections(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.rejections += 1;
    }

    pub async fn increment_completion_errors(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.completion_errors += 1;
    }

    pub async fn increment_commands(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.commands_processed += 1;
    }

    pub async fn set_active_sessions(&self, count: usize) {
        let mut metrics = self.metrics.write().await;
        metrics.active_sessions = count;
    }
}

/// Health check endpoint handler
async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let uptime = state.start_time.elapsed().unwrap_or_default().as_secs();

    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "healthy".to_string(),
            uptime_seconds: uptime,
            bot_username: state.bot_username.clone(),
        }),
    )
}

/// Metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> Json<Metrics> {
    let metrics = state.metrics.read().await;
    Json(metrics.clone())
}

/// Readiness check (ready to accept traffic)
async fn ready_handler() -> StatusCode {
    StatusCode::OK
}

/// Liveness check (process is alive)
async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Create health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/ready", get(ready_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Start health check server
pub async fn start_health_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Health check server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
