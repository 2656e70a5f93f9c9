use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::store::CardStore;
use crate::{CardId, CardScheduleState, ReviewEvent, SchedulerError, SubjectId, UserId};

type PairKey = (UserId, CardId);

/// Reference store used by tests and the demo binary. Every method body
/// runs under a single map guard, which gives the per-row atomicity the
/// `CardStore` contract asks for.
#[derive(Default)]
pub struct MemoryStore {
    enrollments: RwLock<HashMap<PairKey, SubjectId>>,
    states: RwLock<HashMap<PairKey, CardScheduleState>>,
    events: RwLock<HashMap<PairKey, Vec<ReviewEvent>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn enroll(
        &self,
        user_id: UserId,
        card_id: CardId,
        subject_id: SubjectId,
        now: DateTime<Utc>,
    ) -> Result<(), SchedulerError> {
        let key = (user_id, card_id);
        self.enrollments.write().entry(key).or_insert(subject_id);
        self.states
            .write()
            .entry(key)
            .or_insert_with(|| CardScheduleState::new(user_id, card_id, subject_id, now));
        Ok(())
    }

    async fn unenroll(&self, user_id: UserId, card_id: CardId) -> Result<(), SchedulerError> {
        let key = (user_id, card_id);
        self.enrollments
            .write()
            .remove(&key)
            .ok_or(SchedulerError::NotEnrolled)?;
        self.states.write().remove(&key);
        Ok(())
    }

    async fn is_enrolled(&self, user_id: UserId, card_id: CardId) -> Result<bool, SchedulerError> {
        Ok(self.enrollments.read().contains_key(&(user_id, card_id)))
    }

    async fn subject_of(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<SubjectId, SchedulerError> {
        self.enrollments
            .read()
            .get(&(user_id, card_id))
            .copied()
            .ok_or(SchedulerError::NotEnrolled)
    }

    async fn get_state(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<Option<CardScheduleState>, SchedulerError> {
        Ok(self.states.read().get(&(user_id, card_id)).cloned())
    }

    async fn put_state(&self, state: &CardScheduleState) -> Result<(), SchedulerError> {
        self.states
            .write()
            .insert((state.user_id, state.card_id), state.clone());
        Ok(())
    }

    async fn list_states(
        &self,
        user_id: UserId,
        subject_id: Option<SubjectId>,
    ) -> Result<Vec<CardScheduleState>, SchedulerError> {
        let states = self.states.read();
        let mut v: Vec<CardScheduleState> = states
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        if let Some(sid) = subject_id {
            v.retain(|s| s.subject_id == sid);
        }
        Ok(v)
    }

    async fn append_event(&self, event: &ReviewEvent) -> Result<(), SchedulerError> {
        self.events
            .write()
            .entry((event.user_id, event.card_id))
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn list_events(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<Vec<ReviewEvent>, SchedulerError> {
        Ok(self
            .events
            .read()
            .get(&(user_id, card_id))
            .cloned()
            .unwrap_or_default())
    }
}
