use std::sync::Arc;

use noteful_db::Store;

use crate::auth::Authenticator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence handle, created once at startup.
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Password checks and token issuance.
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Wire up state around a store, building the [`Authenticator`] from the
    /// config's JWT settings.
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let authenticator = Arc::new(Authenticator::new(Arc::clone(&store), config.jwt.clone()));
        Self {
            store,
            config: Arc::new(config),
            authenticator,
        }
    }
}
