//! In-memory repositories. They back the test suites and are handy for
//! poking at the API without a database; semantics mirror the Postgres
//! implementations, including regex title search.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::RegexBuilder;

use super::{EventRepo, RepoError, UserRepo};
use crate::domain::event::{Event, EventContent, EventSearch, EventStatus, NewEvent};
use crate::domain::user::{NewUser, User, UserRole};

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: Mutex<BTreeMap<String, User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: &NewUser) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&user.email) {
            return Err(RepoError::Conflict(user.email.clone()));
        }
        rows.insert(
            user.email.clone(),
            User {
                email: user.email.clone(),
                full_name: user.full_name.clone(),
                role: user.role,
                total_posts: 0,
                approved: 0,
            },
        );
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().get(email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn set_role(&self, email: &str, role: UserRole) -> Result<bool, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(email) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_total_posts(&self, email: &str) -> Result<(), RepoError> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(email) {
            user.total_posts += 1;
        }
        Ok(())
    }

    async fn decrement_total_posts(&self, email: &str) -> Result<(), RepoError> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(email) {
            user.total_posts = (user.total_posts - 1).max(0);
        }
        Ok(())
    }

    async fn increment_approved(&self, email: &str) -> Result<(), RepoError> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(email) {
            user.approved += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEventRepo {
    next_id: AtomicI64,
    rows: Mutex<BTreeMap<i64, Event>>,
}

impl MemoryEventRepo {
    fn collect<F>(&self, keep: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventRepo for MemoryEventRepo {
    async fn insert(&self, new: &NewEvent) -> Result<i64, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let c = &new.content;
        self.rows.lock().unwrap().insert(
            id,
            Event {
                id,
                title: c.title.clone(),
                description: c.description.clone(),
                photo: c.photo.clone(),
                category: c.category,
                location: c.location.clone(),
                participant: c.participant,
                date: c.date,
                author: new.author.clone(),
                status: new.status,
                updated_at: new.updated_at,
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RepoError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update_content(
        &self,
        id: i64,
        content: &EventContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(event) => {
                event.title = content.title.clone();
                event.description = content.description.clone();
                event.photo = content.photo.clone();
                event.category = content.category;
                event.location = content.location.clone();
                event.participant = content.participant;
                event.date = content.date;
                event.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(
        &self,
        id: i64,
        status: EventStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(event) => {
                event.status = status;
                event.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Event>, RepoError> {
        let mut events = self.collect(|e| e.author == author);
        events.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(events)
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepoError> {
        let mut events = self.collect(|_| true);
        events.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(events)
    }

    async fn search_approved(&self, search: &EventSearch) -> Result<Vec<Event>, RepoError> {
        let matcher = match &search.title_pattern {
            Some(pattern) => Some(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| RepoError::Malformed(e.to_string()))?,
            ),
            None => None,
        };
        Ok(self.collect(|e| {
            e.status == EventStatus::Approved
                && matcher.as_ref().map_or(true, |m| m.is_match(&e.title))
                && search
                    .category
                    .as_ref()
                    .map_or(true, |c| e.category.as_str() == c)
        }))
    }

    async fn upcoming_approved(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Event>, RepoError> {
        let mut events = self.collect(|e| e.status == EventStatus::Approved && e.date > after);
        events.sort_by(|a, b| b.date.cmp(&a.date));
        events.truncate(limit as usize);
        Ok(events)
    }

    async fn count_by_author(&self, author: &str) -> Result<i64, RepoError> {
        Ok(self.collect(|e| e.author == author).len() as i64)
    }

    async fn count_by_author_and_status(
        &self,
        author: &str,
        status: EventStatus,
    ) -> Result<i64, RepoError> {
        Ok(self
            .collect(|e| e.author == author && e.status == status)
            .len() as i64)
    }

    async fn count_by_status(&self, status: EventStatus) -> Result<i64, RepoError> {
        Ok(self.collect(|e| e.status == status).len() as i64)
    }

    async fn count_with_status_after(
        &self,
        status: EventStatus,
        after: DateTime<Utc>,
    ) -> Result<i64, RepoError> {
        Ok(self.collect(|e| e.status == status && e.date > after).len() as i64)
    }
}
