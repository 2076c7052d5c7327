use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::connector::api::Container;
use crate::connector::protocol::{ChatRequestBody, ChatResponseBody, ErrorBody};
use crate::domain::DomainError;

/// `POST /api/chat` — classify the last message and either return follow-up
/// questions or a final answer.
pub async fn chat(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid request format",
                Some(rejection.to_string()),
            );
        }
    };

    match container
        .handle_chat_use_case()
        .execute(&request.messages)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(ChatResponseBody::from(reply))).into_response(),
        Err(err) => domain_error_response(err),
    }
}

fn domain_error_response(err: DomainError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!("chat request failed: {err}");
    }
    let details = err.details().map(str::to_string);
    error_response(status, &err.to_string(), details)
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}
