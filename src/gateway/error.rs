use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::policy::PolicyError;

use super::FAQDESK_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("answer failed: {0}")]
    AnswerFailed(#[from] PolicyError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, faqdesk_status) = match &self {
            GatewayError::InvalidRequest(_) | GatewayError::AnswerFailed(PolicyError::EmptyQuestion) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::AnswerFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "answer_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            FAQDESK_STATUS_HEADER,
            HeaderValue::from_static(faqdesk_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
