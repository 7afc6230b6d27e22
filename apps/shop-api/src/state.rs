//! Application state management

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
    pub auth: JwtAuth,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client, db: Database) -> Self {
        let auth = JwtAuth::new(&config.jwt);
        Self {
            config,
            mongo_client,
            db,
            auth,
        }
    }
}
