use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::{DailyStudyStat, SchedulerError, UserId};

/// Sink for committed reviews. Best effort by contract: the review has
/// already been persisted when this runs, and a lost notification costs
/// a streak update, nothing more.
#[async_trait]
pub trait StreakSink: Send + Sync {
    async fn record_review(
        &self,
        user_id: UserId,
        occurred_at: DateTime<Utc>,
        passed: bool,
    ) -> Result<(), SchedulerError>;
}

/// In-process streak aggregator: per-user per-day counters, consumed by
/// gamification. Never feeds back into scheduling decisions.
#[derive(Default)]
pub struct StreakTracker {
    days: RwLock<HashMap<UserId, BTreeMap<NaiveDate, DailyStudyStat>>>,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for one calendar day, with the streak day that day
    /// represents filled in.
    pub fn stats_for(&self, user_id: UserId, day: NaiveDate) -> DailyStudyStat {
        let mut stat = self
            .days
            .read()
            .get(&user_id)
            .and_then(|m| m.get(&day))
            .copied()
            .unwrap_or_default();
        stat.study_streak_day = self.streak(user_id, day);
        stat
    }

    /// Consecutive study days ending at `today`; 0 if none.
    pub fn streak(&self, user_id: UserId, today: NaiveDate) -> u32 {
        let days = self.days.read();
        let Some(per_day) = days.get(&user_id) else {
            return 0;
        };
        let mut streak = 0u32;
        let mut day = today;
        while per_day.get(&day).is_some_and(|d| d.cards_reviewed > 0) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }
}

#[async_trait]
impl StreakSink for StreakTracker {
    async fn record_review(
        &self,
        user_id: UserId,
        occurred_at: DateTime<Utc>,
        passed: bool,
    ) -> Result<(), SchedulerError> {
        let mut days = self.days.write();
        let stat = days
            .entry(user_id)
            .or_default()
            .entry(occurred_at.date_naive())
            .or_default();
        stat.cards_reviewed += 1;
        if passed {
            stat.reviews_correct += 1;
        }
        Ok(())
    }
}
