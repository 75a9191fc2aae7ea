use crate::db::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    /// Registrations presenting this code become operators.
    pub operator_sign_up_code: Option<String>,
}

impl From<&wayfare_store::app_config::AuthConfig> for AuthConfig {
    fn from(config: &wayfare_store::app_config::AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration_seconds,
            operator_sign_up_code: config.operator_sign_up_code.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(db: Database, auth: AuthConfig) -> Self {
        Self { db: Arc::new(db), auth }
    }
}
