pub mod admin;
pub mod auth;
pub mod events;
pub mod public;
pub mod users;

use axum::Json;
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use shared::auth::cookie::SESSION_COOKIE;
use shared::lifecycle::LifecycleError;
use shared::repo::RepoError;

pub async fn health() -> &'static str {
    "Server is running..."
}

pub(crate) fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value())
}

pub(crate) fn ack(message: &str) -> Json<Value> {
    Json(json!({ "acknowledged": true, "message": message }))
}

/// Failures the API reports in-band rather than as an HTTP error status.
pub(crate) fn ack_failure(message: &str) -> Json<Value> {
    Json(json!({ "acknowledged": false, "message": message }))
}

pub(crate) fn repo_failure(err: RepoError) -> Json<Value> {
    tracing::error!(error = %err, "store operation failed");
    ack_failure("Something went wrong")
}

pub(crate) fn lifecycle_failure(err: LifecycleError) -> Json<Value> {
    match err {
        LifecycleError::Validation(message) => ack_failure(&message),
        LifecycleError::MissingEvent => ack_failure("Event not found"),
        LifecycleError::Store(e) => repo_failure(e),
    }
}
