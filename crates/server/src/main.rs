use std::sync::Arc;

use anyhow::Context;
use marquee_catalog::omdb::OmdbClient;
use marquee_favorites::{DurableStore, JsonFileStore, SqliteStore};
use marquee_server::config::{LogFormat, ServerConfig, StoreBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
    }

    let store: Arc<dyn DurableStore> = match &config.store {
        StoreBackend::Sqlite(db_path) => {
            info!(db_path = %db_path, "connecting to database");
            let pool = marquee_db::open(db_path)
                .await
                .context("failed to open database")?;
            info!("migrations complete");
            Arc::new(SqliteStore::new(pool))
        }
        StoreBackend::JsonDir(dir) => {
            info!(dir = %dir.display(), "using JSON file store");
            Arc::new(JsonFileStore::new(dir.clone()))
        }
    };

    let catalog = OmdbClient::new(config.omdb.clone()).context("failed to build OMDb client")?;

    let app_state = marquee_server::state::AppState::new(Arc::new(catalog), store).await;
    info!(
        favorites = app_state.favorites.lock().await.count(),
        "favorites loaded"
    );

    let app = marquee_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
