use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use wellbeing_journal::config::Config;
use wellbeing_journal::models::settings::AppSettings;
use wellbeing_journal::services::assistant::{Assistant, AssistantError};
use wellbeing_journal::store::SqliteStore;
use wellbeing_journal::{app, AppState};

/// Scripted stand-in for the CLI assistant.
struct FakeAssistant {
    reply: Option<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl FakeAssistant {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Assistant for FakeAssistant {
    async fn complete(&self, _settings: &AppSettings, prompt: &str) -> Result<String, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("wellbeing coach"));
        match self.reply {
            Some(reply) => Ok(reply.to_string()),
            None => Err(AssistantError::Failed {
                code: Some(1),
                stderr: "boom".into(),
            }),
        }
    }
}

async fn test_app_with(config: Config, assistant: FakeAssistant) -> Router {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    app(AppState::new(Arc::new(store), Arc::new(assistant), config))
}

async fn test_app() -> Router {
    test_app_with(Config::default(), FakeAssistant::replying("Keep going.")).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_and_readiness() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "wellbeing-journal");

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["store"], "ok");
}

#[tokio::test]
async fn saving_entries_regenerates_the_week() {
    let app = test_app().await;

    for (date, score) in [("2024-03-04", 1), ("2024-03-05", 2), ("2024-03-06", 3)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/entries",
            Some(json!({ "date": date, "scores": { "maslow_physiological": score } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/api/summaries/2024-03-08", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weekStart"], "2024-03-04");
    assert_eq!(body["weekEnd"], "2024-03-10");
    assert_eq!(body["entryCount"], 3);
    assert_eq!(body["averages"]["maslow_physiological"], 2.0);
    assert_eq!(body["criticalAreas"][0]["questionId"], "maslow_physiological");
    assert_eq!(body["microActions"][0]["title"], "Quality Sleep");
}

#[tokio::test]
async fn partial_update_keeps_stored_fields() {
    let app = test_app().await;

    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "scores": { "sdt_autonomy": 4 }, "joy": 7 })),
    )
    .await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "notes": "walked to work" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["scores"]["sdt_autonomy"], 4);
    assert_eq!(body["entry"]["joy"], 7);
    assert_eq!(body["entry"]["notes"], "walked to work");
}

#[tokio::test]
async fn invalid_entries_are_rejected_before_saving() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "scores": { "no_such_question": 3 } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 422);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "anxiety": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, Method::GET, "/api/entries/2024-03-04", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn empty_week_summary_has_no_actions() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/summaries/2024-03-06", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averages"], json!({}));
    assert_eq!(body["criticalAreas"], json!([]));
    assert_eq!(body["microActions"], json!([]));

    // Lazily created, so it now shows up in history.
    let (_, list) = send(
        &app,
        Method::GET,
        "/api/summaries?start_date=2024-03-01&end_date=2024-03-31",
        None,
    )
    .await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn day_micro_actions_are_frozen_onto_the_entry() {
    let app = test_app().await;
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-05", "scores": { "habit_mindfulness": 1 } })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries/2024-03-05/micro-actions",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["microActions"][0]["id"], "breathing");
    assert_eq!(body["microActions"][1]["id"], "quality_sleep");

    let (_, stored) = send(&app, Method::GET, "/api/entries/2024-03-05", None).await;
    assert_eq!(stored["microActions"], body["microActions"]);
}

#[tokio::test]
async fn weekly_ai_summary_survives_regeneration() {
    let app = test_app_with(Config::default(), FakeAssistant::replying("A steady week.")).await;
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "scores": { "perma_meaning": 2 } })),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/summaries/2024-03-04/ai-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "content": "A steady week." }));

    // A later save in the same week rebuilds the summary but keeps the text.
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-07", "scores": { "perma_meaning": 4 } })),
    )
    .await;
    let (_, summary) = send(&app, Method::GET, "/api/summaries/2024-03-07", None).await;
    assert_eq!(summary["averages"]["perma_meaning"], 3.0);
    assert_eq!(summary["claudeSummary"], "A steady week.");
}

#[tokio::test]
async fn failed_assistant_call_stores_nothing() {
    let app = test_app_with(Config::default(), FakeAssistant::failing()).await;
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "mood": "bad" })),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/entries/2024-03-04/ai-summary", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 502);
    assert!(body["error"].as_str().unwrap().contains("boom"));

    let (_, entry) = send(&app, Method::GET, "/api/entries/2024-03-04", None).await;
    assert!(entry.get("aiSummary").is_none());
}

#[tokio::test]
async fn daily_ai_summary_is_stored_on_success() {
    let app = test_app().await;
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "mood": "good", "gratitude": 8 })),
    )
    .await;

    let (status, _) = send(&app, Method::POST, "/api/entries/2024-03-04/ai-summary", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, entry) = send(&app, Method::GET, "/api/entries/2024-03-04", None).await;
    assert_eq!(entry["aiSummary"], "Keep going.");
    assert_eq!(entry["gratitude"], 8);
}

#[tokio::test]
async fn assistant_endpoints_are_rate_limited() {
    let assistant = FakeAssistant::replying("ok");
    let calls = assistant.calls.clone();
    let config = Config {
        assistant_max_calls: 1,
        ..Config::default()
    };
    let app = test_app_with(config, assistant).await;
    send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-04", "mood": "okay" })),
    )
    .await;

    let (first, _) = send(&app, Method::POST, "/api/entries/2024-03-04/ai-summary", None).await;
    let (second, body) = send(&app, Method::POST, "/api/summaries/2024-03-04/ai-summary", None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], 429);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn settings_never_echo_the_api_key() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiEnabled"], false);
    assert_eq!(body["hasApiKey"], false);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/settings",
        Some(json!({ "aiEnabled": true, "aiProvider": "gemini", "language": "pl", "apiKey": "sk-123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiProvider"], "gemini");
    assert_eq!(body["language"], "pl");
    assert_eq!(body["hasApiKey"], true);
    assert!(body.get("apiKey").is_none());
}

#[tokio::test]
async fn catalog_lists_questions_and_actions() {
    let app = test_app().await;

    let (_, questions) = send(&app, Method::GET, "/api/catalog/questions", None).await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 20);
    assert_eq!(questions[0]["id"], "maslow_physiological");

    let (_, actions) = send(&app, Method::GET, "/api/catalog/micro-actions", None).await;
    assert_eq!(actions[0]["id"], "quality_sleep");
    assert_eq!(actions[0]["priority"], "high");
}

#[tokio::test]
async fn export_then_import_restores_the_journal() {
    let source = test_app_with(Config::default(), FakeAssistant::replying("Rest more.")).await;
    send(
        &source,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-05", "scores": { "maslow_safety": 2 } })),
    )
    .await;
    send(&source, Method::POST, "/api/summaries/2024-03-05/ai-summary", None).await;

    let (status, mut snapshot) = send(&source, Method::GET, "/api/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["version"], 1);
    snapshot["entries"][0]["scores"]["retired_question"] = json!(4);

    let target = test_app().await;
    let (status, report) = send(&target, Method::POST, "/api/import", Some(snapshot)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["importedEntries"], 1);
    assert_eq!(report["regeneratedWeeks"], 1);
    assert_eq!(report["droppedScoreKeys"], 1);

    let (_, entry) = send(&target, Method::GET, "/api/entries/2024-03-05", None).await;
    assert!(entry["scores"].get("retired_question").is_none());

    let (_, summary) = send(&target, Method::GET, "/api/summaries/2024-03-05", None).await;
    assert_eq!(summary["claudeSummary"], "Rest more.");
    assert_eq!(summary["averages"]["maslow_safety"], 2.0);
}

#[tokio::test]
async fn import_rejects_newer_snapshot_versions() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::POST, "/api/import", Some(json!({ "version": 99 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn dates_outside_the_supported_window_are_rejected() {
    let app = test_app().await;
    for uri in [
        "/api/summaries/+262142-12-31",
        "/api/summaries/-262143-01-05/regenerate",
        "/api/entries/+262142-12-31",
        "/api/entries?end_date=-262143-01-05",
        "/api/entries?start_date=1899-12-31&end_date=2024-03-04",
        "/api/summaries?end_date=%2B262142-12-31",
    ] {
        let method = if uri.ends_with("/regenerate") { Method::POST } else { Method::GET };
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["error"]["code"], 422);
    }

    let (status, _) = send(&app, Method::GET, "/api/summaries/9999-12-26", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn every_saved_entry_is_exported() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "1899-12-31", "mood": "good" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    for date in ["1900-01-01", "2024-03-04", "9999-12-26"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/entries",
            Some(json!({ "date": date, "mood": "good" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{date}");
    }

    let (_, snapshot) = send(&app, Method::GET, "/api/export", None).await;
    let dates: Vec<&str> = snapshot["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["1900-01-01", "2024-03-04", "9999-12-26"]);
}

#[tokio::test]
async fn import_rejects_records_outside_the_supported_window() {
    let app = test_app().await;
    let snapshot = json!({
        "version": 1,
        "entries": [
            {
                "date": "2024-03-04",
                "mood": "good",
                "createdAt": "2024-03-04T20:00:00Z",
                "updatedAt": "2024-03-04T20:00:00Z",
            },
            {
                "date": "1899-12-31",
                "mood": "bad",
                "createdAt": "2024-03-04T20:00:00Z",
                "updatedAt": "2024-03-04T20:00:00Z",
            },
        ],
    });
    let (status, _) = send(&app, Method::POST, "/api/import", Some(snapshot)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/api/entries/2024-03-04", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn imported_summary_lands_on_its_monday() {
    let source = test_app().await;
    send(
        &source,
        Method::POST,
        "/api/entries",
        Some(json!({ "date": "2024-03-05", "scores": { "maslow_safety": 2 } })),
    )
    .await;
    let (_, mut snapshot) = send(&source, Method::GET, "/api/export", None).await;
    snapshot["summaries"][0]["weekStart"] = json!("2024-03-06");
    snapshot["summaries"][0]["claudeSummary"] = json!("Lock the door, then rest.");

    let target = test_app().await;
    let (status, _) = send(&target, Method::POST, "/api/import", Some(snapshot)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, summaries) = send(
        &target,
        Method::GET,
        "/api/summaries?start_date=2024-03-01&end_date=2024-03-31",
        None,
    )
    .await;
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["weekStart"], "2024-03-04");
    assert_eq!(summaries[0]["claudeSummary"], "Lock the door, then rest.");
}
