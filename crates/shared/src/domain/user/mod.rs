use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    General,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::General => "general",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(UserRole::General),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// A registered account. `total_posts` and `approved` are denormalized
/// counters maintained by the event lifecycle; the events table is the
/// ground truth and the counters may drift behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub full_name: String,
    #[serde(rename = "userType")]
    pub role: UserRole,
    pub total_posts: i64,
    pub approved: i64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn general(email: String, full_name: String) -> Self {
        Self {
            email,
            full_name,
            role: UserRole::General,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".into());
        }
        if self.full_name.trim().is_empty() {
            return Err("Name is required".into());
        }
        Ok(())
    }
}
