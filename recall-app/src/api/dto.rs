use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recall_core::SchedulerError;

#[derive(Deserialize)]
pub struct ReviewIn {
    pub user_id: Uuid,
    pub card_id: Uuid,
    pub grade: u8,
}

#[derive(Serialize)]
pub struct ReviewOut {
    pub due_at: DateTime<Utc>,
    pub interval_days: u32,
    pub passed: bool,
}

#[derive(Deserialize)]
pub struct QueueParams {
    pub user_id: Uuid,
    pub subject_id: Option<Uuid>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct EnrollIn {
    pub user_id: Uuid,
    pub card_id: Uuid,
    pub subject_id: Uuid,
}

#[derive(Deserialize)]
pub struct StreakParams {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct StreakOut {
    pub streak_days: u32,
    pub cards_reviewed_today: u32,
    pub reviews_correct_today: u32,
}

/// Busy maps to 409 so clients retry with backoff; storage failures are
/// the upstream dependency's fault, hence 502.
pub fn error_status(err: &SchedulerError) -> StatusCode {
    match err {
        SchedulerError::InvalidGrade(_) => StatusCode::BAD_REQUEST,
        SchedulerError::NotEnrolled => StatusCode::NOT_FOUND,
        SchedulerError::Busy => StatusCode::CONFLICT,
        SchedulerError::Storage(_) => StatusCode::BAD_GATEWAY,
    }
}
