use axum::Json;

use crate::catalog::{MicroActionDef, Question, MICRO_ACTIONS, QUESTIONS};

pub async fn list_questions() -> Json<&'static [Question]> {
    Json(QUESTIONS)
}

pub async fn list_micro_actions() -> Json<&'static [MicroActionDef]> {
    Json(MICRO_ACTIONS)
}
