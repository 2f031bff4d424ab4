use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use shared::domain::event::{EventSearch, EventStatus};

use super::{ack_failure, repo_failure};
use crate::state::AppState;

const UPCOMING_LIMIT: i64 = 6;

#[derive(Deserialize)]
pub struct BrowseQuery {
    #[serde(rename = "searchKey")]
    pub search_key: Option<String>,
    pub category: Option<String>,
}

/// Public listing: approved events only, optionally narrowed by a
/// case-insensitive title pattern and a category.
pub async fn browse_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Json<Value> {
    let search = EventSearch {
        title_pattern: query.search_key.filter(|s| !s.is_empty()),
        category: query.category.filter(|s| !s.is_empty()),
    };
    match state.events.search_approved(&search).await {
        Ok(events) => Json(json!(events)),
        Err(e) => repo_failure(e),
    }
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

pub async fn event_by_id(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Json<Value> {
    match state.events.find_by_id(query.id).await {
        Ok(Some(event)) => Json(json!(event)),
        Ok(None) => ack_failure("Event not found"),
        Err(e) => repo_failure(e),
    }
}

pub async fn upcoming_events(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state
        .events
        .upcoming_approved(Utc::now(), UPCOMING_LIMIT)
        .await
    {
        Ok(events) => Json(json!(events)),
        Err(e) => repo_failure(e),
    }
}

/// Approved totals for the landing page. "completedEvents" has always
/// counted approved events with a future date; the name is kept for the
/// frontend's sake.
pub async fn count_events(State(state): State<Arc<AppState>>) -> Json<Value> {
    let total = state.events.count_by_status(EventStatus::Approved).await;
    let completed = state
        .events
        .count_with_status_after(EventStatus::Approved, Utc::now())
        .await;
    match (total, completed) {
        (Ok(total), Ok(completed)) => Json(json!({
            "totalEvents": total,
            "completedEvents": completed,
        })),
        (Err(e), _) | (_, Err(e)) => repo_failure(e),
    }
}
