use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::Value;

use shared::auth::cookie::{removal_cookie, session_cookie};
use shared::domain::user::NewUser;
use shared::repo::RepoError;

use super::{ack, ack_failure, repo_failure};
use crate::state::AppState;

/// Defaulted so a body missing a field still reaches `NewUser::validate`
/// and fails with the in-band message.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Registration is open: accounts always start as general users with zeroed
/// counters.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Json<Value> {
    let user = NewUser::general(req.email, req.full_name);
    if let Err(message) = user.validate() {
        return ack_failure(&message);
    }
    match state.users.insert(&user).await {
        Ok(()) => ack("User registered"),
        Err(RepoError::Conflict(_)) => ack_failure("User already exists"),
        Err(e) => repo_failure(e),
    }
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<TokenRequest>,
) -> (CookieJar, Json<Value>) {
    match state.tokens.issue(&req.email) {
        Ok(token) => {
            let jar = jar.add(session_cookie(state.cfg.environment, token));
            (jar, ack("Token issued"))
        }
        Err(e) => {
            tracing::error!(error = %e, "token issue failed");
            (jar, ack_failure("Could not issue token"))
        }
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.add(removal_cookie(state.cfg.environment));
    (jar, ack("Logged out"))
}
