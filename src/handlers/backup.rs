use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::handlers::supported_date;
use crate::handlers::ws::{broadcast, JournalEvent};
use crate::models::snapshot::{ImportResponse, JournalSnapshot, SNAPSHOT_VERSION};
use crate::services::journal;
use crate::AppState;

pub async fn export_journal(State(state): State<AppState>) -> AppResult<Json<JournalSnapshot>> {
    let snapshot = journal::export_snapshot(state.store.as_ref()).await?;
    tracing::info!(
        entries = snapshot.entries.len(),
        summaries = snapshot.summaries.len(),
        "Journal exported"
    );
    Ok(Json(snapshot))
}

pub async fn import_journal(
    State(state): State<AppState>,
    Json(snapshot): Json<JournalSnapshot>,
) -> AppResult<Json<ImportResponse>> {
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(AppError::Validation(format!(
            "Snapshot version {} is newer than supported version {}",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }
    for entry in &snapshot.entries {
        supported_date(entry.date)?;
    }
    for summary in &snapshot.summaries {
        supported_date(summary.week_start)?;
    }

    let report = journal::import_snapshot(state.store.as_ref(), snapshot).await?;
    broadcast(
        &state,
        JournalEvent::JournalImported {
            entries: report.imported_entries,
        },
    );
    Ok(Json(report))
}
