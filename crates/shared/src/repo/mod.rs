use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::event::{Event, EventContent, EventSearch, EventStatus, NewEvent};
use crate::domain::user::{NewUser, User, UserRole};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("duplicate key: {0}")]
    Conflict(String),
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Key/query operations over persisted accounts. Counter mutations live
/// here so callers cannot write arbitrary counter values.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: &NewUser) -> Result<(), RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn list(&self) -> Result<Vec<User>, RepoError>;
    /// Returns false when no such user exists.
    async fn set_role(&self, email: &str, role: UserRole) -> Result<bool, RepoError>;
    async fn increment_total_posts(&self, email: &str) -> Result<(), RepoError>;
    /// Saturates at zero; the counter never goes negative.
    async fn decrement_total_posts(&self, email: &str) -> Result<(), RepoError>;
    async fn increment_approved(&self, email: &str) -> Result<(), RepoError>;
}

/// Key/query operations over persisted events.
#[async_trait]
pub trait EventRepo: Send + Sync {
    async fn insert(&self, new: &NewEvent) -> Result<i64, RepoError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RepoError>;
    /// Replaces the mutable fields. Returns false when no such event exists.
    async fn update_content(
        &self,
        id: i64,
        content: &EventContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError>;
    async fn set_status(
        &self,
        id: i64,
        status: EventStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
    /// Most recently touched first.
    async fn list_by_author(&self, author: &str) -> Result<Vec<Event>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Event>, RepoError>;
    /// Approved events only, filtered by the public browse parameters.
    async fn search_approved(&self, search: &EventSearch) -> Result<Vec<Event>, RepoError>;
    /// Approved events dated after `after`, newest date first, capped at `limit`.
    async fn upcoming_approved(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Event>, RepoError>;
    async fn count_by_author(&self, author: &str) -> Result<i64, RepoError>;
    async fn count_by_author_and_status(
        &self,
        author: &str,
        status: EventStatus,
    ) -> Result<i64, RepoError>;
    async fn count_by_status(&self, status: EventStatus) -> Result<i64, RepoError>;
    async fn count_with_status_after(
        &self,
        status: EventStatus,
        after: DateTime<Utc>,
    ) -> Result<i64, RepoError>;
}
