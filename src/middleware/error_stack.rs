//! Adds the error chain of server errors to the response body in development.
//!
//! `AppError` attaches an [`ErrorStack`] extension to every 5xx response. This
//! layer copies it into the JSON body as `stack` when the deployment is
//! `development` and leaves the body untouched otherwise.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use courseload_core::ErrorStack;
use serde_json::Value;
use tracing::warn;

use crate::state::AppState;

/// Upper bound on an error body we are willing to rewrite.
const MAX_ERROR_BODY: usize = 64 * 1024;

pub async fn expose_error_stack(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !state.app_config.environment.is_development() {
        return response;
    }

    let Some(ErrorStack(stack)) = response.extensions().get::<ErrorStack>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "Could not buffer error body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let rewritten = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(mut body)) => {
            body.insert("stack".to_string(), Value::String(stack));
            serde_json::to_vec(&body).unwrap_or_else(|_| bytes.to_vec())
        }
        _ => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(rewritten))
}
