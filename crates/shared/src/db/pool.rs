use std::sync::Arc;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::repo::postgres::{PgEventRepo, PgUserRepo};
use crate::repo::{EventRepo, UserRepo};
use crate::AppConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection handle shared by the Postgres repositories.
#[derive(Clone)]
pub struct Db(pub Pool<Postgres>);

impl Db {
    /// Connects with the configured pool size and brings the users/events
    /// schema up to date before anything else touches the database.
    pub async fn connect(cfg: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect(&cfg.database_url)
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self(pool))
    }

    /// The repository pair the rest of the app is wired with.
    pub fn repos(&self) -> (Arc<dyn UserRepo>, Arc<dyn EventRepo>) {
        (
            Arc::new(PgUserRepo::new(self.clone())),
            Arc::new(PgEventRepo::new(self.clone())),
        )
    }
}
