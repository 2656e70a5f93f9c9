use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::{CardId, SchedulerError, UserId};

type PairKey = (UserId, CardId);

const DEFAULT_SHARDS: usize = 16;

/// Keyed mutual exclusion over (user, card) pairs: at most one in-flight
/// review per pair. Waits are awaitable and bounded; a timed-out wait
/// surfaces as `Busy`, which callers may retry.
///
/// Entries are never reaped; the table's cardinality is bounded by the
/// number of enrolled pairs, same as the store itself.
pub struct CardLocks {
    shards: Vec<Mutex<HashMap<PairKey, Arc<AsyncMutex<()>>>>>,
}

impl CardLocks {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    pub fn with_shards(n: usize) -> Self {
        Self {
            shards: (0..n.max(1)).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn shard(&self, key: &PairKey) -> &Mutex<HashMap<PairKey, Arc<AsyncMutex<()>>>> {
        let mut h = DefaultHasher::new();
        key.hash(&mut h);
        &self.shards[h.finish() as usize % self.shards.len()]
    }

    /// Returns the pair's guard, waiting at most `wait` for the current
    /// holder to release it. Locks on distinct pairs never contend.
    pub async fn acquire(
        &self,
        user_id: UserId,
        card_id: CardId,
        wait: Duration,
    ) -> Result<OwnedMutexGuard<()>, SchedulerError> {
        let key = (user_id, card_id);
        let cell = self.shard(&key).lock().entry(key).or_default().clone();
        tokio::time::timeout(wait, cell.lock_owned())
            .await
            .map_err(|_| SchedulerError::Busy)
    }
}

impl Default for CardLocks {
    fn default() -> Self {
        Self::new()
    }
}
