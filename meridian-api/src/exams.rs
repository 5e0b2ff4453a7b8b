use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use meridian_exam::models::{Exam, ExamResult};
use meridian_exam::{AttemptStatus, ExamAttempt, ExamDraft};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::{AppState, AttemptEntry};

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    question_id: Uuid,
    option_index: usize,
}

#[derive(Debug, Serialize)]
struct AttemptView {
    id: Uuid,
    exam_id: Uuid,
    status: AttemptStatus,
    remaining_seconds: u32,
    answered_count: usize,
    total_questions: usize,
}

impl AttemptView {
    fn from_attempt(attempt: &ExamAttempt) -> Self {
        Self {
            id: attempt.id,
            exam_id: attempt.exam().id,
            status: attempt.status(),
            remaining_seconds: attempt.remaining_seconds(),
            answered_count: attempt.answered_count(),
            total_questions: attempt.exam().questions.len(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/exams", get(list_exams))
        .route("/v1/exams/{id}", get(get_exam))
        .route("/v1/exams/{id}/attempts", post(start_attempt))
        .route("/v1/attempts/{id}", get(attempt_status))
        .route("/v1/attempts/{id}/answer", put(answer))
        .route("/v1/attempts/{id}/submit", post(submit))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/v1/admin/exams", post(create_exam))
}

async fn list_exams(State(state): State<AppState>) -> Json<Vec<Exam>> {
    let hub = state.exam.read().await;
    Json(hub.catalog.exams().to_vec())
}

async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Exam>, AppError> {
    let hub = state.exam.read().await;
    hub.catalog
        .exam_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Exam not found: {}", id)))
}

async fn create_exam(
    State(state): State<AppState>,
    Json(draft): Json<ExamDraft>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = draft.build()?;
    let mut hub = state.exam.write().await;
    hub.catalog.add_exam(exam.clone());
    hub.persist_exams(state.snapshot.as_ref());
    tracing::info!(title = %exam.title, "exam created");
    Ok((StatusCode::CREATED, Json(exam)))
}

fn claims_user_id(claims: &Claims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Malformed token subject".to_string()))
}

async fn start_attempt(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<AttemptView>), AppError> {
    let user_id = claims_user_id(&claims)?;

    let mut hub = state.exam.write().await;
    let exam = hub
        .catalog
        .exam_by_id(exam_id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Exam not found: {}", exam_id)))?;

    let mut attempt = ExamAttempt::new(exam, user_id);
    attempt.start()?;
    let attempt_id = attempt.id;
    let view = AttemptView::from_attempt(&attempt);
    hub.attempts.insert(
        attempt_id,
        AttemptEntry {
            attempt,
            ticker: None,
        },
    );

    let ticker = tokio::spawn(run_countdown(state.clone(), attempt_id));
    if let Some(entry) = hub.attempts.get_mut(&attempt_id) {
        entry.ticker = Some(ticker);
    }

    tracing::info!(%attempt_id, %exam_id, "attempt started");
    Ok((StatusCode::CREATED, Json(view)))
}

/// One-second countdown driver for a live attempt.
///
/// Stops as soon as the attempt leaves InProgress; on expiry it records the
/// auto-submitted result and mirrors the ledger to the snapshot store.
async fn run_countdown(state: AppState, attempt_id: Uuid) {
    loop {
        sleep(Duration::from_secs(1)).await;

        let mut hub = state.exam.write().await;
        let (result, in_progress) = match hub.attempts.get_mut(&attempt_id) {
            Some(entry) => {
                let result = entry.attempt.tick(Utc::now());
                let in_progress = entry.attempt.status() == AttemptStatus::InProgress;
                (result, in_progress)
            }
            None => break,
        };

        if let Some(result) = result {
            hub.attempts.remove(&attempt_id);
            hub.catalog.record_result(result);
            hub.persist_results(state.snapshot.as_ref());
            break;
        }
        if !in_progress {
            break;
        }
    }
}

fn owned_entry<'a>(
    hub: &'a mut crate::state::ExamAppState,
    attempt_id: Uuid,
    user_id: Uuid,
) -> Result<&'a mut AttemptEntry, AppError> {
    let entry = hub
        .attempts
        .get_mut(&attempt_id)
        .ok_or_else(|| AppError::NotFoundError(format!("Attempt not found: {}", attempt_id)))?;
    if entry.attempt.user_id != user_id {
        return Err(AppError::AuthorizationError(
            "Attempt belongs to another user".to_string(),
        ));
    }
    Ok(entry)
}

async fn attempt_status(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AttemptView>, AppError> {
    let user_id = claims_user_id(&claims)?;
    let mut hub = state.exam.write().await;
    let entry = owned_entry(&mut hub, attempt_id, user_id)?;
    Ok(Json(AttemptView::from_attempt(&entry.attempt)))
}

async fn answer(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AttemptView>, AppError> {
    let user_id = claims_user_id(&claims)?;
    let mut hub = state.exam.write().await;
    let entry = owned_entry(&mut hub, attempt_id, user_id)?;
    entry.attempt.select_answer(req.question_id, req.option_index)?;
    Ok(Json(AttemptView::from_attempt(&entry.attempt)))
}

async fn submit(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ExamResult>, AppError> {
    let user_id = claims_user_id(&claims)?;
    let mut hub = state.exam.write().await;

    let result = {
        let entry = owned_entry(&mut hub, attempt_id, user_id)?;
        let result = entry.attempt.submit(Utc::now())?;
        if let Some(ticker) = entry.ticker.take() {
            ticker.abort();
        }
        result
    };

    // The entry is only needed while the attempt is live; the result now
    // carries everything the caller can still read.
    hub.attempts.remove(&attempt_id);
    hub.catalog.record_result(result.clone());
    hub.persist_results(state.snapshot.as_ref());
    tracing::info!(%attempt_id, score = result.score, "attempt submitted");
    Ok(Json(result))
}
