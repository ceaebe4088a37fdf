//! HTTP gateway (Axum) for the FAQ agent.
//!
//! This module is primarily used by the `faqdesk` server binary.

pub mod error;
pub mod handler;
pub mod sanitize;
pub mod state;


use std::path::Path;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use handler::{ChatRequest, ChatResponse, chat_handler};
pub use sanitize::strip_markdown;
pub use state::HandlerState;

use crate::embedding::TextEncoder;

/// Header carried by health, readiness and error responses.
pub const FAQDESK_STATUS_HEADER: &str = "x-faqdesk-status";

/// Header naming how a chat answer was produced:
/// `direct`, `generated`, `fallback` or `escalated`.
pub const FAQDESK_DECISION_HEADER: &str = "x-faqdesk-decision";

const STATUS_HEALTHY: &str = "healthy";
const STATUS_READY: &str = "ready";
const STATUS_PENDING: &str = "pending";

pub fn create_router<E>(state: HandlerState<E>) -> Router
where
    E: TextEncoder + 'static,
{
    Router::new()
        .route("/", get(landing_handler))
        .route("/chat", get(chat_page_handler::<E>))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E>))
        .route("/api/chat", post(chat_handler::<E>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ComponentStatus {
    pub index: String,
    pub embedder_mode: String,
    pub generator: String,
    pub faq_count: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        FAQDESK_STATUS_HEADER,
        HeaderValue::from_static(STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: TextEncoder + 'static,
{
    let index = state.agent.index();
    let is_ready = index.is_built();

    let components = ComponentStatus {
        index: if is_ready { STATUS_READY } else { STATUS_PENDING }.to_string(),
        embedder_mode: if index.encoder().is_stub() { "stub" } else { "real" }.to_string(),
        generator: if state.agent.has_generator() {
            "loaded"
        } else {
            "absent"
        }
        .to_string(),
        faq_count: index.len(),
    };

    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, STATUS_PENDING)
    };

    let mut headers = HeaderMap::new();
    headers.insert(FAQDESK_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg.to_string(),
            components,
        }),
    )
        .into_response()
}

pub async fn landing_handler() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
  <head><title>FAQ Desk</title></head>
  <body>
    <h1>FAQ Desk</h1>
    <p><a href="/chat">Chat with the assistant</a></p>
  </body>
</html>
"#,
    )
}

#[tracing::instrument(skip(state))]
pub async fn chat_page_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: TextEncoder + 'static,
{
    let Some(path) = state.chat_page_path.as_deref() else {
        return chat_page_not_found("(FAQDESK_CHAT_PAGE_PATH is not set)");
    };

    match tokio::fs::read_to_string(path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Chat page unavailable");
            chat_page_not_found(&display_path(path))
        }
    }
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn chat_page_not_found(looked_for: &str) -> Response {
    let body = format!(
        "<h1>Chat interface not found</h1>\n<p>Looking for: {}</p>\n",
        escape_html(looked_for)
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
