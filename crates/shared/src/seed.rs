use anyhow::Result;

use crate::domain::user::{NewUser, UserRole};
use crate::repo::UserRepo;

/// Idempotent bootstrap: make sure the configured admin account exists and
/// carries the admin role, so a fresh deployment can reach the moderation
/// endpoints.
pub async fn seed(users: &dyn UserRepo, bootstrap_admin: Option<&str>) -> Result<()> {
    let Some(email) = bootstrap_admin else {
        return Ok(());
    };
    match users.find_by_email(email).await? {
        Some(user) if user.role == UserRole::Admin => {}
        Some(_) => {
            users.set_role(email, UserRole::Admin).await?;
            tracing::info!(email, "promoted bootstrap admin");
        }
        None => {
            users
                .insert(&NewUser {
                    email: email.to_owned(),
                    full_name: "Administrator".to_owned(),
                    role: UserRole::Admin,
                })
                .await?;
            tracing::info!(email, "created bootstrap admin");
        }
    }
    Ok(())
}
