use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SchedulerError;

pub type UserId = Uuid;
pub type CardId = Uuid;
pub type SubjectId = Uuid;
pub type EventId = Uuid;

/// Hard floor for the ease factor; updates clamp, never error.
pub const EF_MIN: f32 = 1.3;
pub const EF_DEFAULT: f32 = 2.5;
pub const GRADE_MAX: u8 = 5;
pub const PASS_THRESHOLD: u8 = 3;

/// Self-reported recall quality, 0 (total blackout) to 5 (perfect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    pub fn new(value: u8) -> Result<Self, SchedulerError> {
        if value > GRADE_MAX {
            return Err(SchedulerError::InvalidGrade(value));
        }
        Ok(Grade(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn passed(self) -> bool {
        self.0 >= PASS_THRESHOLD
    }
}

/// Per-(user, card) scheduling row. Owned by the scheduler; mutated only
/// through the review session manager.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardScheduleState {
    pub user_id: UserId,
    pub card_id: CardId,
    pub subject_id: SubjectId,

    pub ease_factor: f32,
    pub interval_days: u32,
    pub repetition_count: u32,
    pub lapse_count: u32,
    pub due_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl CardScheduleState {
    /// Fresh state for a newly enrolled card: immediately due.
    pub fn new(user_id: UserId, card_id: CardId, subject_id: SubjectId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            card_id,
            subject_id,
            ease_factor: EF_DEFAULT,
            interval_days: 0,
            repetition_count: 0,
            lapse_count: 0,
            due_at: now,
            last_reviewed_at: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// A freshly failed card: it has lapsed and has not passed since.
    /// These jump the due queue.
    pub fn is_relearning(&self) -> bool {
        self.lapse_count > 0 && self.repetition_count == 0
    }
}

/// Append-only audit record, one per accepted submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub card_id: CardId,
    pub grade: Grade,
    pub previous: CardScheduleState,
    pub next: CardScheduleState,
    pub occurred_at: DateTime<Utc>,
}

impl ReviewEvent {
    pub fn new(
        grade: Grade,
        previous: CardScheduleState,
        next: CardScheduleState,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: previous.user_id,
            card_id: previous.card_id,
            grade,
            previous,
            next,
            occurred_at,
        }
    }
}

/// What a successful submission hands back to the client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewOutcome {
    pub due_at: DateTime<Utc>,
    pub interval_days: u32,
    pub passed: bool,
}

/// Per-user per-calendar-day counters for the gamification consumer.
/// Never authoritative for scheduling.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStudyStat {
    pub cards_reviewed: u32,
    pub reviews_correct: u32,
    pub study_streak_day: u32,
}
