use serde::Deserialize;

/// Deployment environment. Controls the session cookie attributes: the
/// frontend is served cross-site in production, same-site in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    pub jwt_secret: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Email to seed as the first admin account. Without one, a fresh
    /// deployment has nobody who can reach the admin endpoints.
    #[serde(default)]
    pub bootstrap_admin: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_max_connections() -> u32 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".into(),
        "https://digital-event-scheduler-system.web.app".into(),
        "https://digital-event-scheduler-system.firebaseapp.com".into(),
    ]
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let fig = figment::Figment::new().merge(figment::providers::Env::prefixed("ES_"));
        fig.extract().expect("config load failed")
    }
}
