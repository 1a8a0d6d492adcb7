/**
 * Application State
 *
 * `AppState` is the central state container handed to the Axum router:
 * the Postgres connection pool, the music-generation client, and the
 * resolved configuration. Everything in it is cheap to clone; the pool
 * and the reqwest client are internally reference-counted.
 *
 * The `FromRef` implementations let handlers extract just the piece they
 * need (`State<PgPool>`, `State<MusicClient>`) instead of the whole state.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::music::client::MusicClient;
use crate::server::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool
    pub pool: PgPool,
    /// Client for the external music-generation API
    pub music: MusicClient,
    /// Resolved configuration (session secret, cookie domain, CORS origin)
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: PgPool, music: MusicClient, config: Config) -> Self {
        Self {
            pool,
            music,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for MusicClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.music.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
