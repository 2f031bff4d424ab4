//! Event moderation lifecycle. Events enter as pending, an admin can move
//! them to approved, and both creation and deletion touch the author's
//! cached counters. Every mutation is a short sequence of independent
//! store operations with no cross-operation transaction; a failure partway
//! leaves the earlier steps in place.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::domain::event::{EventDraft, EventStatus, NewEvent};
use crate::repo::{EventRepo, RepoError, UserRepo};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),
    #[error("event not found")]
    MissingEvent,
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Live counts over the events table for one author. Always computed from
/// the store, never read from the cached counters on the user record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventCounts {
    pub total: i64,
    pub approved: i64,
}

#[derive(Clone)]
pub struct EventLifecycle {
    users: Arc<dyn UserRepo>,
    events: Arc<dyn EventRepo>,
}

impl EventLifecycle {
    pub fn new(users: Arc<dyn UserRepo>, events: Arc<dyn EventRepo>) -> Self {
        Self { users, events }
    }

    /// Inserts a pending event, then bumps the author's totalPosts. If the
    /// bump fails the inserted event stays; the counter is a cache and the
    /// store remains the ground truth.
    pub async fn create(&self, author: &str, draft: EventDraft) -> Result<i64, LifecycleError> {
        let content = draft.into_content().map_err(LifecycleError::Validation)?;
        let new = NewEvent::pending(author, content, Utc::now());
        let id = self.events.insert(&new).await?;
        self.users.increment_total_posts(author).await?;
        Ok(id)
    }

    /// Replaces the mutable fields. Status and counters are untouched.
    pub async fn edit(&self, id: i64, draft: EventDraft) -> Result<(), LifecycleError> {
        let content = draft.into_content().map_err(LifecycleError::Validation)?;
        let changed = self
            .events
            .update_content(id, &content, Utc::now())
            .await?;
        if !changed {
            return Err(LifecycleError::MissingEvent);
        }
        Ok(())
    }

    /// Decrements the author's totalPosts, then removes the event. The
    /// decrement is best-effort: on failure the deletion still proceeds.
    pub async fn delete(&self, id: i64) -> Result<(), LifecycleError> {
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::MissingEvent)?;
        if let Err(e) = self.users.decrement_total_posts(&event.author).await {
            tracing::warn!(
                event = id,
                author = %event.author,
                error = %e,
                "totalPosts decrement failed, deleting anyway"
            );
        }
        let deleted = self.events.delete(id).await?;
        if !deleted {
            return Err(LifecycleError::MissingEvent);
        }
        Ok(())
    }

    /// Moves a pending event to approved and bumps the author's approved
    /// counter. There is no transition back, and re-approving is refused
    /// so the counter rises exactly once per event.
    pub async fn approve(&self, id: i64) -> Result<(), LifecycleError> {
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::MissingEvent)?;
        if event.status == EventStatus::Approved {
            return Err(LifecycleError::Validation(
                "Event is already approved".into(),
            ));
        }
        self.users.increment_approved(&event.author).await?;
        let changed = self
            .events
            .set_status(id, EventStatus::Approved, Utc::now())
            .await?;
        if !changed {
            return Err(LifecycleError::MissingEvent);
        }
        Ok(())
    }

    pub async fn authored_counts(&self, author: &str) -> Result<EventCounts, LifecycleError> {
        let total = self.events.count_by_author(author).await?;
        let approved = self
            .events
            .count_by_author_and_status(author, EventStatus::Approved)
            .await?;
        Ok(EventCounts { total, approved })
    }
}
