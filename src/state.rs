use std::sync::Arc;

use anyhow::Context;

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, ProductStore};

/// Shared application context handed to every handler through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: ProductStore,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Open the configured database and build the context around it.
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        // Token settings are checked before touching the database file
        let tokens = TokenIssuer::from_config(&config.security).context("invalid token settings")?;
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to open products database")?;

        Ok(Self {
            config: Arc::new(config),
            store: ProductStore::new(pool),
            tokens,
        })
    }
}
