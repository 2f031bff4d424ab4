#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use shared::domain::event::EventDraft;
use shared::domain::user::{NewUser, UserRole};
use shared::lifecycle::EventLifecycle;
use shared::repo::memory::{MemoryEventRepo, MemoryUserRepo};
use shared::repo::UserRepo;

pub fn stores() -> (Arc<MemoryUserRepo>, Arc<MemoryEventRepo>) {
    (
        Arc::new(MemoryUserRepo::default()),
        Arc::new(MemoryEventRepo::default()),
    )
}

pub fn lifecycle(users: &Arc<MemoryUserRepo>, events: &Arc<MemoryEventRepo>) -> EventLifecycle {
    EventLifecycle::new(users.clone(), events.clone())
}

/// A valid draft dated `days_from_now` days out.
pub fn draft(title: &str, days_from_now: i64) -> EventDraft {
    EventDraft {
        title: title.into(),
        description: "An event worth attending".into(),
        photo: None,
        category: "fest".into(),
        location: "Main auditorium".into(),
        participant: "anyone".into(),
        date: Some((Utc::now() + Duration::days(days_from_now)).to_rfc3339()),
    }
}

pub async fn register(users: &dyn UserRepo, email: &str) {
    users
        .insert(&NewUser::general(email.into(), "Test User".into()))
        .await
        .unwrap();
}

pub async fn register_admin(users: &dyn UserRepo, email: &str) {
    users
        .insert(&NewUser {
            email: email.into(),
            full_name: "Test Admin".into(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();
}
