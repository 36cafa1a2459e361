use std::collections::HashMap;

use axum::{Extension, extract::Query, http::StatusCode, response::Html};

use crate::{
    server::{CallbackState, MalformedPolicy},
    types::{AuthError, AuthorizationResult},
};

const SUCCESS_PAGE: &str = "<html><body><h1>Authorization Successful!</h1><p>You can close this window and return to the terminal.</p></body></html>";

const INVALID_PAGE: &str = "<html><body><h1>Invalid Request</h1></body></html>";

fn error_page(error: &str) -> String {
    format!(
        "<html><body><h1>Authorization Failed</h1><p>Error: {}</p></body></html>",
        error
    )
}

// Deliberately writes nothing to stdout: handler output would interleave
// with the CLI's own progress lines.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<CallbackState>,
) -> (StatusCode, Html<String>) {
    let mut slot = state.slot.lock().await;

    if let Some(code) = params.get("code") {
        if let Some(sender) = slot.take() {
            sender.complete(Ok(AuthorizationResult::Code(code.clone())));
            return (StatusCode::OK, Html(SUCCESS_PAGE.to_string()));
        }
        // A result was already produced by an earlier request.
        return (StatusCode::BAD_REQUEST, Html(INVALID_PAGE.to_string()));
    }

    if let Some(error) = params.get("error") {
        if let Some(sender) = slot.take() {
            sender.complete(Ok(AuthorizationResult::Error(error.clone())));
        }
        return (StatusCode::BAD_REQUEST, Html(error_page(error)));
    }

    if state.policy == MalformedPolicy::FailFast {
        if let Some(sender) = slot.take() {
            sender.complete(Err(AuthError::MalformedCallback));
        }
    }

    (StatusCode::BAD_REQUEST, Html(INVALID_PAGE.to_string()))
}
