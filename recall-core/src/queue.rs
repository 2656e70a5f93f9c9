use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::store::CardStore;
use crate::{CardId, CardScheduleState, SchedulerError, SubjectId, UserId};

/// Ordered, bounded study queue for one user. Read-only: takes no locks,
/// marks nothing "in session", and is safe at arbitrary concurrency
/// alongside review submissions.
///
/// Ordering: freshly failed cards first, then most overdue, card id as
/// the deterministic tiebreak. Without a subject filter, due cards are
/// bucketed per subject and merged round-robin so one large subject
/// cannot monopolize a session.
pub async fn build_queue(
    store: &dyn CardStore,
    user_id: UserId,
    subject_id: Option<SubjectId>,
    limit: usize,
    now: DateTime<Utc>,
) -> Result<Vec<CardId>, SchedulerError> {
    let mut due: Vec<CardScheduleState> = store
        .list_states(user_id, subject_id)
        .await?
        .into_iter()
        .filter(|s| s.is_due(now))
        .collect();

    due.sort_by_key(priority_key);

    if subject_id.is_some() {
        return Ok(due.iter().map(|s| s.card_id).take(limit).collect());
    }

    // Buckets keep the global order internally; BTreeMap keeps the
    // subject rotation order stable across calls.
    let mut buckets: BTreeMap<SubjectId, VecDeque<CardId>> = BTreeMap::new();
    for s in &due {
        buckets.entry(s.subject_id).or_default().push_back(s.card_id);
    }
    Ok(round_robin(buckets.into_values().collect(), limit))
}

fn priority_key(s: &CardScheduleState) -> (bool, DateTime<Utc>, CardId) {
    (!s.is_relearning(), s.due_at, s.card_id)
}

fn round_robin(mut buckets: Vec<VecDeque<CardId>>, limit: usize) -> Vec<CardId> {
    let mut out = Vec::with_capacity(limit.min(buckets.iter().map(VecDeque::len).sum()));
    'fill: while out.len() < limit {
        let mut progressed = false;
        for bucket in buckets.iter_mut() {
            if let Some(id) = bucket.pop_front() {
                out.push(id);
                progressed = true;
                if out.len() == limit {
                    break 'fill;
                }
            }
        }
        if !progressed {
            break;
        }
    }
    out
}
