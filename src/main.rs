use anyhow::Context;
use std::sync::Arc;

use wellbeing_journal::config::{Config, StoreBackend};
use wellbeing_journal::services::assistant::CliAssistant;
use wellbeing_journal::store::{JsonFileStore, RecordStore, SqliteStore};
use wellbeing_journal::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellbeing_journal=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("Failed to create data dir {}", config.data_dir.display()))?;

    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::Sqlite => Arc::new(
            SqliteStore::connect(&config.database_url)
                .await
                .context("Failed to open SQLite journal")?,
        ),
        StoreBackend::Json => Arc::new(
            JsonFileStore::open(&config.journal_file)
                .await
                .context("Failed to open JSON journal file")?,
        ),
    };
    tracing::info!(backend = ?config.store_backend, "Record store ready");

    let assistant = Arc::new(CliAssistant::new(
        config.assistant_timeout(),
        config.assistant_binary.clone(),
    ));

    let addr = config.listen_addr();
    let router = app(AppState::new(store, assistant, config));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}
