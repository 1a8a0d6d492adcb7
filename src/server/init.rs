/**
 * Server Initialization
 *
 * Wires the application together: connects the database pool, runs the
 * embedded migrations, constructs the music client, and builds the router.
 *
 * Unlike request handling, initialization is strict: a database that
 * cannot be reached or a migration that fails stops the server from
 * starting at all.
 */

use axum::Router;
use sqlx::PgPool;

use crate::music::client::MusicClient;
use crate::routes::router::create_router;
use crate::server::config::Config;
use crate::server::state::AppState;

/// Create and configure the Axum application.
///
/// # Errors
///
/// Returns the underlying `sqlx` error if the pool cannot connect or a
/// migration fails.
pub async fn create_app(config: Config) -> Result<Router, sqlx::Error> {
    tracing::info!("Connecting to database");
    let pool = PgPool::connect(&config.database_url).await?;

    tracing::info!("Running database migrations");
    sqlx::migrate!().run(&pool).await?;

    let music = MusicClient::new(
        config.music_api_url.clone(),
        config.music_api_key.clone(),
    );

    let state = AppState::new(pool, music, config);
    Ok(create_router(state))
}
