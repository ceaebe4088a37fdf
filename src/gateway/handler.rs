use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::embedding::TextEncoder;
use crate::gateway::error::GatewayError;
use crate::gateway::sanitize::strip_markdown;
use crate::gateway::state::HandlerState;
use crate::gateway::FAQDESK_DECISION_HEADER;
use crate::session::InteractionRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub confidence: f32,
}

/// `POST /api/chat`.
///
/// The interaction log gets the answer as the agent produced it; the caller
/// gets it with markdown markers stripped.
#[instrument(skip(state, request), fields(session_id = tracing::field::Empty))]
pub async fn chat_handler<E>(
    State(state): State<HandlerState<E>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: TextEncoder + 'static,
{
    let request: ChatRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid request schema: {e}")))?;

    if request.question.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "question must not be empty".to_string(),
        ));
    }

    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    tracing::Span::current().record("session_id", tracing::field::display(&session_id));

    let agent = Arc::clone(&state.agent);
    let question = request.question.clone();
    let response = tokio::task::spawn_blocking(move || agent.answer_question(&question))
        .await
        .map_err(|e| GatewayError::InternalError(format!("answer task failed: {e}")))??;

    info!(
        source = %response.source,
        confidence = response.confidence,
        "Question answered"
    );

    let record = InteractionRecord::new(&session_id, &request.question, &response.answer);
    if let Err(e) = state.session_log.record(record).await {
        warn!(error = %e, "Failed to record interaction");
    }

    let answer = strip_markdown(&response.answer);
    debug!(
        raw_len = response.answer.len(),
        stripped_len = answer.len(),
        "Answer cleaned for display"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        FAQDESK_DECISION_HEADER,
        HeaderValue::from_static(response.source.as_header_value()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(ChatResponse {
            answer,
            confidence: response.confidence,
        }),
    )
        .into_response())
}
