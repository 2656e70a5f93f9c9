use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use recall_core::{
    build_queue, store::memory::MemoryStore, CardStore, ReviewService, SchedulerError,
    StreakTracker,
};

use crate::api::dto::{
    error_status, EnrollIn, QueueParams, ReviewIn, ReviewOut, StreakOut, StreakParams,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReviewService>,
    pub store: Arc<MemoryStore>,
    pub streaks: Arc<StreakTracker>,
    pub default_limit: usize,
}

type Rejection = (StatusCode, Json<serde_json::Value>);

fn reject(err: SchedulerError) -> Rejection {
    (
        error_status(&err),
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

pub async fn post_review(
    State(st): State<Arc<AppState>>,
    Json(body): Json<ReviewIn>,
) -> Result<Json<ReviewOut>, Rejection> {
    let now = chrono::Utc::now();
    let out = st
        .service
        .submit_review(body.user_id, body.card_id, body.grade, now)
        .await
        .map_err(reject)?;
    Ok(Json(ReviewOut {
        due_at: out.due_at,
        interval_days: out.interval_days,
        passed: out.passed,
    }))
}

pub async fn get_queue(
    State(st): State<Arc<AppState>>,
    Query(q): Query<QueueParams>,
) -> Result<Json<Vec<uuid::Uuid>>, Rejection> {
    let now = chrono::Utc::now();
    let limit = q.limit.unwrap_or(st.default_limit);
    let ids = build_queue(&*st.store, q.user_id, q.subject_id, limit, now)
        .await
        .map_err(reject)?;
    Ok(Json(ids))
}

pub async fn post_enroll(
    State(st): State<Arc<AppState>>,
    Json(body): Json<EnrollIn>,
) -> Result<StatusCode, Rejection> {
    let now = chrono::Utc::now();
    st.store
        .enroll(body.user_id, body.card_id, body.subject_id, now)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_streak(
    State(st): State<Arc<AppState>>,
    Query(q): Query<StreakParams>,
) -> Json<StreakOut> {
    let today = chrono::Utc::now().date_naive();
    let stat = st.streaks.stats_for(q.user_id, today);
    Json(StreakOut {
        streak_days: stat.study_streak_day,
        cards_reviewed_today: stat.cards_reviewed,
        reviews_correct_today: stat.reviews_correct,
    })
}
