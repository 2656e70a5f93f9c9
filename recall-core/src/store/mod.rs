use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{CardId, CardScheduleState, ReviewEvent, SchedulerError, SubjectId, UserId};

pub mod memory;

/// Durable per-(user, card) scheduling rows plus the append-only review
/// log. Implementations must make `put_state` atomic at single-row
/// granularity; nothing coarser is assumed.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Registers the pair and eagerly materializes an immediately-due
    /// state row. Idempotent.
    async fn enroll(
        &self,
        user_id: UserId,
        card_id: CardId,
        subject_id: SubjectId,
        now: DateTime<Utc>,
    ) -> Result<(), SchedulerError>;

    /// Cascade-deletes the schedule state. Review events survive as audit.
    async fn unenroll(&self, user_id: UserId, card_id: CardId) -> Result<(), SchedulerError>;

    async fn is_enrolled(&self, user_id: UserId, card_id: CardId) -> Result<bool, SchedulerError>;

    async fn subject_of(&self, user_id: UserId, card_id: CardId)
        -> Result<SubjectId, SchedulerError>;

    async fn get_state(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<Option<CardScheduleState>, SchedulerError>;

    async fn put_state(&self, state: &CardScheduleState) -> Result<(), SchedulerError>;

    async fn list_states(
        &self,
        user_id: UserId,
        subject_id: Option<SubjectId>,
    ) -> Result<Vec<CardScheduleState>, SchedulerError>;

    async fn append_event(&self, event: &ReviewEvent) -> Result<(), SchedulerError>;

    async fn list_events(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<Vec<ReviewEvent>, SchedulerError>;
}
