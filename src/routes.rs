use crate::error::AppError;
use crate::libarena::question::{CheckAnswer, CheckResult, NewQuestion, PublicQuestion, Question};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use log::{debug, info};
use std::sync::Arc;

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PublicQuestion>>, AppError> {
    let questions = state.questions.find_all()?;
    debug!("[Server] Listing {} questions", questions.len());
    Ok(Json(questions))
}

pub async fn random_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicQuestion>, AppError> {
    Ok(Json(state.questions.get_random()?))
}

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let Json(new_question) = payload?;
    let stored = state.questions.create(new_question)?;
    info!("[Server] Created question {}", stored.id);
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn check_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckAnswer>, JsonRejection>,
) -> Result<Json<CheckResult>, AppError> {
    let Json(check) = payload?;
    Ok(Json(state.questions.check_answer(&check)?))
}
