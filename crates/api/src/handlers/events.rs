use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use shared::auth::gate::{authorize_chain, GateContext};
use shared::domain::event::EventDraft;
use shared::error::ApiError;

use super::{ack, ack_failure, lifecycle_failure, repo_failure, session_token};
use crate::handlers::users::EmailRequest;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddEventRequest {
    pub email: Option<String>,
    #[serde(rename = "eventInfo", default)]
    pub event_info: EventDraft,
}

#[derive(Deserialize)]
pub struct EventRefRequest {
    pub email: Option<String>,
    #[serde(rename = "eventID")]
    pub event_id: i64,
}

#[derive(Deserialize)]
pub struct EditEventRequest {
    pub email: Option<String>,
    #[serde(rename = "eventID")]
    pub event_id: i64,
    #[serde(rename = "updatedEvent", default)]
    pub updated_event: EventDraft,
}

pub async fn add_event(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<AddEventRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;
    let author = ctx.identity().ok_or(ApiError::Forbidden)?;

    Ok(match state.lifecycle.create(author, req.event_info).await {
        Ok(id) => Json(json!({
            "acknowledged": true,
            "message": "Event submitted for review",
            "id": id,
        })),
        Err(e) => lifecycle_failure(e),
    })
}

pub async fn my_events(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;
    let author = ctx.identity().ok_or(ApiError::Forbidden)?;

    Ok(match state.events.list_by_author(author).await {
        Ok(events) => Json(json!(events)),
        Err(e) => repo_failure(e),
    })
}

pub async fn my_event(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EventRefRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;

    Ok(match state.events.find_by_id(req.event_id).await {
        Ok(Some(event)) => Json(json!(event)),
        Ok(None) => ack_failure("Event not found"),
        Err(e) => repo_failure(e),
    })
}

pub async fn edit_event(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EditEventRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;

    Ok(match state.lifecycle.edit(req.event_id, req.updated_event).await {
        Ok(()) => ack("Event updated"),
        Err(e) => lifecycle_failure(e),
    })
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EventRefRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(
        session_token(&jar),
        req.email.as_deref(),
        Some(req.event_id),
    );
    authorize_chain(&state.delete_gates, &mut ctx).await?;

    Ok(match state.lifecycle.delete(req.event_id).await {
        Ok(()) => ack("Event deleted"),
        Err(e) => lifecycle_failure(e),
    })
}

pub async fn my_event_count(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = GateContext::new(session_token(&jar), req.email.as_deref(), None);
    authorize_chain(&state.owner_gates, &mut ctx).await?;
    let author = ctx.identity().ok_or(ApiError::Forbidden)?;

    Ok(match state.lifecycle.authored_counts(author).await {
        Ok(counts) => Json(json!(counts)),
        Err(e) => lifecycle_failure(e),
    })
}
