use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;
use shared::AppConfig;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.cfg);
    Router::new()
        .route("/", get(handlers::health))
        // account + session
        .route("/users", post(handlers::auth::register))
        .route("/jwt", post(handlers::auth::issue_token))
        .route("/logout", post(handlers::auth::logout))
        .route("/user", post(handlers::users::profile))
        .route("/user-type", post(handlers::users::role))
        // owner endpoints
        .route("/add-event", post(handlers::events::add_event))
        .route("/my-events", post(handlers::events::my_events))
        .route("/my-event", post(handlers::events::my_event))
        .route("/edit-event", post(handlers::events::edit_event))
        .route("/delete-event", post(handlers::events::delete_event))
        .route("/my-event-count", post(handlers::events::my_event_count))
        // admin endpoints
        .route(
            "/get-all-events-for-admin",
            post(handlers::admin::all_events),
        )
        .route("/event", post(handlers::admin::event_by_id))
        .route("/event-approve", post(handlers::admin::approve_event))
        .route("/get-all-users", post(handlers::admin::all_users))
        .route("/make-admin", post(handlers::admin::make_admin))
        // public browsing
        .route("/get-all-events", get(handlers::public::browse_events))
        .route("/get-event-by-id", get(handlers::public::event_by_id))
        .route("/up-coming-events", get(handlers::public::upcoming_events))
        .route("/count-events", get(handlers::public::count_events))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
