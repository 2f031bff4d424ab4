use api::routes::build_router;
use api::state::AppState;
use shared::db::pool::Db;
use shared::{seed, AppConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    init_tracing();
    let cfg = AppConfig::from_env();
    let db = Db::connect(&cfg).await.expect("db connect");

    let (users, events) = db.repos();
    seed::seed(users.as_ref(), cfg.bootstrap_admin.as_deref())
        .await
        .expect("seed");

    let state = AppState::new(cfg.clone(), users, events);
    let app = build_router(state);

    let addr = cfg.listen_addr.parse().expect("listen addr");
    tracing::info!(?addr, "api listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();
}
