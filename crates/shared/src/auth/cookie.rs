use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::Environment;

pub const SESSION_COOKIE: &str = "event_scheduler_token";

const SESSION_TTL: time::Duration = time::Duration::hours(1);

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(env: Environment, token: String) -> Cookie<'static> {
    build(env, token, SESSION_TTL)
}

/// Expired cookie that clears the session. Attributes must match the ones
/// used when setting the cookie or browsers may keep the old value.
pub fn removal_cookie(env: Environment) -> Cookie<'static> {
    build(env, String::new(), time::Duration::ZERO)
}

fn build(env: Environment, value: String, max_age: time::Duration) -> Cookie<'static> {
    let builder = Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .max_age(max_age);
    let builder = match env {
        Environment::Production => builder.secure(true).same_site(SameSite::None),
        Environment::Development => builder.secure(false).same_site(SameSite::Strict),
    };
    builder.finish()
}
