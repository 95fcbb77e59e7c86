mod api;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use serde_json::Value;
use std::sync::Arc;

// Internal imports
use crate::api::{ChatRequest, ChatResponse, RequestError};
use relay_core::{FlowConfig, FlowInvoker};

// 1. Application State
// Read-only after startup; every request gets its own payload.
#[derive(Clone)]
struct AppState {
    config: Arc<FlowConfig>,
    invoker: Arc<FlowInvoker>,
}

impl AppState {
    fn new(config: FlowConfig) -> Self {
        let invoker = FlowInvoker::new(&config);
        Self {
            config: Arc::new(config),
            invoker: Arc::new(invoker),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 2. Logging Setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    info!("Research Relay Initializing...");

    // 3. Load Configuration (fatal before anything is served)
    let config = FlowConfig::from_env().context("Failed to load flow configuration")?;
    let bind_addr = config.bind_addr.clone();

    // 4. Bundle State
    let state = AppState::new(config);

    // 5. Start Server
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Relay listening on {}...", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    // Any origin may call any path.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- HANDLERS ---

async fn health_check() -> &'static str {
    "Research Relay: Operational"
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    // An unreadable body carries no usable query.
    let body = payload.map(|Json(body)| body).unwrap_or(Value::Null);

    let request = match ChatRequest::from_body(&body) {
        Ok(request) => request,
        Err(e @ RequestError::MissingQuery) => {
            return (StatusCode::BAD_REQUEST, Json(ChatResponse::error(e.to_string())))
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::error(e.to_string())),
            )
        }
    };

    // No endpoint: the invoker runs the configured default flow.
    let outcome = state
        .invoker
        .invoke(
            &request.query,
            None,
            "chat",
            "chat",
            request.tweaks.as_ref(),
            Some(&state.config.application_token),
        )
        .await;

    match outcome {
        Ok(output) => (StatusCode::OK, Json(ChatResponse::success(output))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse::error(e.to_string())),
        ),
    }
}
