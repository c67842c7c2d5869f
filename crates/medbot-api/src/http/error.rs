//! Application error type mapping to HTTP status codes.
//!
//! Every failure uses the same `{"response": "..."}` body as a successful
//! reply, so the chat page can show it as a bot message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use medbot_types::chat::ChatReply;
use medbot_types::llm::LlmError;

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request, no message found";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred, please try again later";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Body missing, not a JSON object, or without a `msg` key.
    InvalidRequest,
    /// The model call failed.
    Llm(LlmError),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE),
            AppError::Llm(e) => {
                tracing::error!(error = %e, "reply generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(ChatReply::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRequest.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(LlmError::RateLimited).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
