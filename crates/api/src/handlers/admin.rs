use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use shared::auth::gate::{authorize_chain, GateContext};
use shared::domain::user::UserRole;
use shared::error::ApiError;

use super::{ack, ack_failure, lifecycle_failure, repo_failure, session_token};
use crate::handlers::events::EventRefRequest;
use crate::handlers::users::EmailRequest;
use crate::state::AppState;

pub async fn all_events(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.admin_gates, &mut ctx).await?;

    Ok(match state.events.list_all().await {
        Ok(events) => Json(json!(events)),
        Err(e) => repo_failure(e),
    })
}

pub async fn event_by_id(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EventRefRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.admin_gates, &mut ctx).await?;

    Ok(match state.events.find_by_id(req.event_id).await {
        Ok(Some(event)) => Json(json!(event)),
        Ok(None) => ack_failure("Event not found"),
        Err(e) => repo_failure(e),
    })
}

pub async fn approve_event(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EventRefRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.admin_gates, &mut ctx).await?;

    Ok(match state.lifecycle.approve(req.event_id).await {
        Ok(()) => ack("Event approved"),
        Err(e) => lifecycle_failure(e),
    })
}

pub async fn all_users(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.admin_gates, &mut ctx).await?;

    Ok(match state.users.list().await {
        Ok(users) => {
            let listed: Vec<Value> = users
                .iter()
                .map(|u| {
                    json!({
                        "email": u.email,
                        "fullName": u.full_name,
                        "userType": u.role,
                    })
                })
                .collect();
            Json(json!(listed))
        }
        Err(e) => repo_failure(e),
    })
}

#[derive(Deserialize)]
pub struct MakeAdminRequest {
    pub email: Option<String>,
    #[serde(rename = "reqAdminEmail")]
    pub req_admin_email: String,
}

pub async fn make_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<MakeAdminRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.admin_gates, &mut ctx).await?;

    Ok(
        match state
            .users
            .set_role(&req.req_admin_email, UserRole::Admin)
            .await
        {
            Ok(true) => ack("User promoted to admin"),
            Ok(false) => ack_failure("User not found"),
            Err(e) => repo_failure(e),
        },
    )
}
