use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::locks::CardLocks;
use crate::sm2::apply_review;
use crate::stats::StreakSink;
use crate::store::CardStore;
use crate::{
    CardId, CardScheduleState, Grade, ReviewEvent, ReviewOutcome, SchedulerError, UserId,
};

/// How long a submission waits on a contended card before giving up.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(250);

/// Orchestrates one review submission end to end: validate, lock, load,
/// apply the pure SM-2 step, persist, notify. The service itself holds no
/// scheduling state; everything lives in the store.
pub struct ReviewService {
    store: Arc<dyn CardStore>,
    streaks: Arc<dyn StreakSink>,
    locks: CardLocks,
    lock_wait: Duration,
}

impl ReviewService {
    pub fn new(store: Arc<dyn CardStore>, streaks: Arc<dyn StreakSink>) -> Self {
        Self {
            store,
            streaks,
            locks: CardLocks::new(),
            lock_wait: DEFAULT_LOCK_WAIT,
        }
    }

    pub fn with_lock_wait(mut self, wait: Duration) -> Self {
        self.lock_wait = wait;
        self
    }

    /// Submits one graded review for a (user, card) pair.
    ///
    /// Concurrent submissions for the same pair are serialized by lock
    /// acquisition order; the loser reads the winner's result as its
    /// previous state. A failed submission leaves the stored state
    /// untouched. Not idempotent across retries: `now` advances, so after
    /// an ambiguous outcome callers must re-fetch rather than resubmit
    /// blindly.
    pub async fn submit_review(
        &self,
        user_id: UserId,
        card_id: CardId,
        grade: u8,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, SchedulerError> {
        // Rejected before any state is read.
        let grade = Grade::new(grade)?;

        if !self.store.is_enrolled(user_id, card_id).await? {
            return Err(SchedulerError::NotEnrolled);
        }

        let _guard = self.locks.acquire(user_id, card_id, self.lock_wait).await?;

        let previous = match self.store.get_state(user_id, card_id).await? {
            Some(state) => state,
            // Enrolled but never materialized: first review of a card
            // whose store enrolls lazily.
            None => {
                let subject_id = self.store.subject_of(user_id, card_id).await?;
                CardScheduleState::new(user_id, card_id, subject_id, now)
            }
        };

        let next = apply_review(&previous, grade, now);

        // State first, event second: losing the event to a crash in
        // between costs analytics, never scheduling correctness.
        self.store.put_state(&next).await?;
        let event = ReviewEvent::new(grade, previous, next.clone(), now);
        self.store.append_event(&event).await?;

        let outcome = ReviewOutcome {
            due_at: next.due_at,
            interval_days: next.interval_days,
            passed: grade.passed(),
        };

        // Fire and forget: a lost streak update must never fail a review.
        let streaks = Arc::clone(&self.streaks);
        tokio::spawn(async move {
            if let Err(err) = streaks.record_review(user_id, now, grade.passed()).await {
                warn!(%user_id, %card_id, %err, "streak update dropped");
            }
        });

        Ok(outcome)
    }
}
