use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a submission carries no photo URL.
pub const DEFAULT_EVENT_PHOTO: &str = "https://i.ibb.co.com/FLWX4bfj/Event-Default-Logo.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Exam,
    Fest,
    Tour,
    Game,
    Others,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Exam => "exam",
            EventCategory::Fest => "fest",
            EventCategory::Tour => "tour",
            EventCategory::Game => "game",
            EventCategory::Others => "others",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exam" => Some(EventCategory::Exam),
            "fest" => Some(EventCategory::Fest),
            "tour" => Some(EventCategory::Tour),
            "game" => Some(EventCategory::Game),
            "others" => Some(EventCategory::Others),
            _ => None,
        }
    }
}

/// Intended audience of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Teachers,
    Students,
    Anyone,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Teachers => "teachers",
            Audience::Students => "students",
            Audience::Anyone => "anyone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "teachers" => Some(Audience::Teachers),
            "students" => Some(Audience::Students),
            "anyone" => Some(Audience::Anyone),
            _ => None,
        }
    }
}

/// Moderation state. Events enter as `Pending` and can only move to
/// `Approved`; there is no rejected state and no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EventStatus::Pending),
            "approved" => Some(EventStatus::Approved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo: String,
    pub category: EventCategory,
    pub location: String,
    pub participant: Audience,
    pub date: DateTime<Utc>,
    pub author: String,
    pub status: EventStatus,
    pub updated_at: DateTime<Utc>,
}

/// Event fields as submitted by a client. Everything arrives as loose,
/// defaulted strings so a submission with a missing field, an unknown
/// category, or an unparseable date still deserializes and fails
/// validation in-band instead of being bounced at extraction. Used both
/// for creation and for edits, which replace the same field set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub category: String,
    pub location: String,
    pub participant: String,
    pub date: Option<String>,
}

impl EventDraft {
    /// Checks the required fields and parses the typed ones, in the order
    /// the stored schema declares them. The message of the first failure
    /// is what the client sees.
    pub fn into_content(self) -> Result<EventContent, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        let category = match self.category.trim() {
            "" => return Err("Category is required".into()),
            raw => EventCategory::parse(raw)
                .ok_or_else(|| format!("{raw} is not a valid category"))?,
        };
        if self.location.trim().is_empty() {
            return Err("Location is required".into());
        }
        let participant = match self.participant.trim() {
            "" => return Err("Participant is required".into()),
            raw => Audience::parse(raw)
                .ok_or_else(|| format!("{raw} is not a valid participant"))?,
        };
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => return Err("Date is required".into()),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| format!("{raw} is not a valid date"))?,
        };
        Ok(EventContent {
            photo: self
                .photo
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_PHOTO.to_owned()),
            title: self.title,
            description: self.description,
            category,
            location: self.location,
            participant,
            date,
        })
    }
}

/// The mutable fields of an event, shared by create and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContent {
    pub title: String,
    pub description: String,
    pub photo: String,
    pub category: EventCategory,
    pub location: String,
    pub participant: Audience,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub content: EventContent,
    pub author: String,
    pub status: EventStatus,
    pub updated_at: DateTime<Utc>,
}

impl NewEvent {
    /// A fresh submission: always enters moderation as pending.
    pub fn pending(author: &str, content: EventContent, now: DateTime<Utc>) -> Self {
        Self {
            content,
            author: author.to_owned(),
            status: EventStatus::Pending,
            updated_at: now,
        }
    }
}

/// Public browse filters: a case-insensitive title pattern and an exact
/// category. An unknown category simply matches nothing.
#[derive(Debug, Default, Clone)]
pub struct EventSearch {
    pub title_pattern: Option<String>,
    pub category: Option<String>,
}
