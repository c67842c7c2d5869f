//! Reply endpoint.
//!
//! POST /get - Answer one chat message within the caller's conversation.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use serde_json::Value;

use medbot_types::chat::ChatReply;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::state::AppState;

/// Text of the `msg` key: strings verbatim, any other JSON value as its
/// compact JSON text. `None` when the body is not an object with `msg`.
fn message_text(body: &Value) -> Option<String> {
    match body.as_object()?.get("msg")? {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// POST /get
///
/// Body: `{"msg": ...}`. Replies `{"response": "..."}`; failures use the
/// same shape with a 400 or 500 status.
pub async fn get_reply(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let msg = match body {
        Ok(Json(body)) => message_text(&body),
        Err(rejection) => {
            debug!(error = %rejection, "rejected chat request");
            None
        }
    };
    let Some(msg) = msg else {
        return AppError::InvalidRequest.into_response();
    };

    debug!(session = %session.id, new = session.is_new, chars = msg.len(), "message received");

    let history = state.history(&session.id);
    let result = {
        let mut history = history.lock().await;
        state.reply_service.reply(&mut history, &msg).await
    };

    let mut response = match result {
        Ok(answer) => Json(ChatReply::new(answer)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    };

    if let Some(cookie) = session.set_cookie() {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}
