use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Response},
    http::StatusCode,
};
use chrono::NaiveDate;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;

use crate::AppState;

/// Change notifications pushed to the UI so it re-reads affected records.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEvent {
    EntrySaved { date: NaiveDate },
    SummaryRegenerated { week_start: NaiveDate },
    AiSummaryStored { date: NaiveDate },
    JournalImported { entries: usize },
    SettingsChanged,
}

/// Publishes an event to every connected client. Having no listeners is fine.
pub fn broadcast(state: &AppState, event: JournalEvent) {
    let Some(tx) = state.ws_tx.as_ref() else {
        return;
    };
    match serde_json::to_string(&event) {
        Ok(msg) => {
            let _ = tx.send(msg);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to encode journal event"),
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let Some(tx) = state.ws_tx.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Live updates disabled").into_response();
    };
    ws.on_upgrade(move |socket| handle_socket(socket, tx.subscribe()))
}

async fn handle_socket(socket: WebSocket, mut rx: tokio::sync::broadcast::Receiver<String>) {
    let (mut sender, mut receiver) = socket.split();

    tracing::debug!("WebSocket connection established");

    let mut send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    tracing::debug!(message = %text, "WebSocket message received");
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!("WebSocket connection closed");
}
