use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use shared::auth::gate::{authorize_chain, GateContext};
use shared::error::ApiError;

use super::{ack_failure, repo_failure, session_token};
use crate::state::AppState;

/// Body of every owner-scoped request: the identity the caller claims to
/// act as. Optional so an omitted email reaches the identity gate and is
/// denied there, not bounced at extraction.
#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;
    let email = ctx.identity().ok_or(ApiError::Forbidden)?;

    Ok(match state.users.find_by_email(email).await {
        Ok(Some(user)) => Json(json!(user)),
        Ok(None) => ack_failure("User not found"),
        Err(e) => repo_failure(e),
    })
}

pub async fn role(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;
    let email = ctx.identity().ok_or(ApiError::Forbidden)?;

    Ok(match state.users.find_by_email(email).await {
        Ok(Some(user)) => Json(json!({ "acknowledged": true, "userType": user.role })),
        Ok(None) => ack_failure("User not found"),
        Err(e) => repo_failure(e),
    })
}
