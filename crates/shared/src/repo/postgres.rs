use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::{EventRepo, RepoError, UserRepo};
use crate::db::pool::Db;
use crate::domain::event::{
    Audience, Event, EventCategory, EventContent, EventSearch, EventStatus, NewEvent,
};
use crate::domain::user::{NewUser, User, UserRole};

const EVENT_COLUMNS: &str =
    "id, title, description, photo, category, location, participant, date, author, status, updated_at";

#[derive(Clone)]
pub struct PgUserRepo {
    db: Db,
}

impl PgUserRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, RepoError> {
    let role: String = row.try_get("user_type")?;
    Ok(User {
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        role: UserRole::parse(&role)
            .ok_or_else(|| RepoError::Malformed(format!("unknown user_type: {role}")))?,
        total_posts: row.try_get("total_posts")?,
        approved: row.try_get("approved")?,
    })
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: &NewUser) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO users (email, full_name, user_type) VALUES ($1, $2, $3)")
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(user.role.as_str())
            .execute(&self.db.0)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepoError::Conflict(user.email.clone())
                }
                _ => RepoError::Query(e),
            })?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query(
            "SELECT email, full_name, user_type, total_posts, approved FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db.0)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query(
            "SELECT email, full_name, user_type, total_posts, approved FROM users ORDER BY email",
        )
        .fetch_all(&self.db.0)
        .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn set_role(&self, email: &str, role: UserRole) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE users SET user_type = $2 WHERE email = $1")
            .bind(email)
            .bind(role.as_str())
            .execute(&self.db.0)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn increment_total_posts(&self, email: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE users SET total_posts = total_posts + 1 WHERE email = $1")
            .bind(email)
            .execute(&self.db.0)
            .await?;
        Ok(())
    }

    async fn decrement_total_posts(&self, email: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE users SET total_posts = GREATEST(total_posts - 1, 0) WHERE email = $1")
            .bind(email)
            .execute(&self.db.0)
            .await?;
        Ok(())
    }

    async fn increment_approved(&self, email: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE users SET approved = approved + 1 WHERE email = $1")
            .bind(email)
            .execute(&self.db.0)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgEventRepo {
    db: Db,
}

impl PgEventRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn event_from_row(row: &PgRow) -> Result<Event, RepoError> {
    let category: String = row.try_get("category")?;
    let participant: String = row.try_get("participant")?;
    let status: String = row.try_get("status")?;
    Ok(Event {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        photo: row.try_get("photo")?,
        category: EventCategory::parse(&category)
            .ok_or_else(|| RepoError::Malformed(format!("unknown category: {category}")))?,
        location: row.try_get("location")?,
        participant: Audience::parse(&participant)
            .ok_or_else(|| RepoError::Malformed(format!("unknown participant: {participant}")))?,
        date: row.try_get("date")?,
        author: row.try_get("author")?,
        status: EventStatus::parse(&status)
            .ok_or_else(|| RepoError::Malformed(format!("unknown status: {status}")))?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl EventRepo for PgEventRepo {
    async fn insert(&self, new: &NewEvent) -> Result<i64, RepoError> {
        let c = &new.content;
        let row = sqlx::query(
            "INSERT INTO events \
             (title, description, photo, category, location, participant, date, author, status, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(&c.title)
        .bind(&c.description)
        .bind(&c.photo)
        .bind(c.category.as_str())
        .bind(&c.location)
        .bind(c.participant.as_str())
        .bind(c.date)
        .bind(&new.author)
        .bind(new.status.as_str())
        .bind(new.updated_at)
        .fetch_one(&self.db.0)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RepoError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.db.0).await?;
        row.as_ref().map(event_from_row).transpose()
    }

    async fn update_content(
        &self,
        id: i64,
        content: &EventContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE events SET title = $2, description = $3, photo = $4, category = $5, \
             location = $6, participant = $7, date = $8, updated_at = $9 WHERE id = $1",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.photo)
        .bind(content.category.as_str())
        .bind(&content.location)
        .bind(content.participant.as_str())
        .bind(content.date)
        .bind(updated_at)
        .execute(&self.db.0)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_status(
        &self,
        id: i64,
        status: EventStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let result =
            sqlx::query("UPDATE events SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .bind(updated_at)
                .execute(&self.db.0)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.db.0)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Event>, RepoError> {
        let sql =
            format!("SELECT {EVENT_COLUMNS} FROM events WHERE author = $1 ORDER BY updated_at DESC");
        let rows = sqlx::query(&sql).bind(author).fetch_all(&self.db.0).await?;
        rows.iter().map(event_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepoError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY updated_at DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.db.0).await?;
        rows.iter().map(event_from_row).collect()
    }

    async fn search_approved(&self, search: &EventSearch) -> Result<Vec<Event>, RepoError> {
        let base = format!("SELECT {EVENT_COLUMNS} FROM events WHERE status = 'approved'");
        let rows = match (&search.title_pattern, &search.category) {
            (Some(pattern), Some(category)) => {
                sqlx::query(&format!("{base} AND title ~* $1 AND category = $2"))
                    .bind(pattern)
                    .bind(category)
                    .fetch_all(&self.db.0)
                    .await?
            }
            (Some(pattern), None) => {
                sqlx::query(&format!("{base} AND title ~* $1"))
                    .bind(pattern)
                    .fetch_all(&self.db.0)
                    .await?
            }
            (None, Some(category)) => {
                sqlx::query(&format!("{base} AND category = $1"))
                    .bind(category)
                    .fetch_all(&self.db.0)
                    .await?
            }
            (None, None) => sqlx::query(&base).fetch_all(&self.db.0).await?,
        };
        rows.iter().map(event_from_row).collect()
    }

    async fn upcoming_approved(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Event>, RepoError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE status = 'approved' AND date > $1 ORDER BY date DESC LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(after)
            .bind(limit)
            .fetch_all(&self.db.0)
            .await?;
        rows.iter().map(event_from_row).collect()
    }

    async fn count_by_author(&self, author: &str) -> Result<i64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE author = $1")
            .bind(author)
            .fetch_one(&self.db.0)
            .await?;
        Ok(count)
    }

    async fn count_by_author_and_status(
        &self,
        author: &str,
        status: EventStatus,
    ) -> Result<i64, RepoError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE author = $1 AND status = $2")
                .bind(author)
                .bind(status.as_str())
                .fetch_one(&self.db.0)
                .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: EventStatus) -> Result<i64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.db.0)
            .await?;
        Ok(count)
    }

    async fn count_with_status_after(
        &self,
        status: EventStatus,
        after: DateTime<Utc>,
    ) -> Result<i64, RepoError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE status = $1 AND date > $2")
                .bind(status.as_str())
                .bind(after)
                .fetch_one(&self.db.0)
                .await?;
        Ok(count)
    }
}
