use chrono::{DateTime, Duration, Utc};

use crate::{CardScheduleState, Grade, EF_MIN};

/// Pure SM-2 transition. No I/O, no shared state: identical inputs always
/// produce the identical next state, which makes retries safe to reason
/// about and the math testable without a store.
pub fn apply_review(state: &CardScheduleState, grade: Grade, now: DateTime<Utc>) -> CardScheduleState {
    let miss = (5 - grade.value()) as f32;

    // Ease tracks long-run difficulty, so it moves on every review,
    // failures included. Clamped at the floor instead of erroring.
    let ease = (state.ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(EF_MIN);

    let (reps, interval) = if grade.passed() {
        let reps = state.repetition_count + 1;
        let interval = match reps {
            1 => 1,
            2 => 6,
            _ => {
                // Floor of interval + 1 keeps growth strictly monotonic
                // even when the rounded product would stall.
                let grown = (state.interval_days as f32 * ease).round() as u32;
                grown.max(state.interval_days + 1)
            }
        };
        (reps, interval)
    } else {
        // Failed cards resurface tomorrow, never same-day; the due queue
        // gives them priority through the relearning flag.
        (0, 1)
    };

    CardScheduleState {
        ease_factor: ease,
        interval_days: interval,
        repetition_count: reps,
        lapse_count: state.lapse_count + u32::from(!grade.passed()),
        due_at: now + Duration::days(i64::from(interval)),
        last_reviewed_at: Some(now),
        ..state.clone()
    }
}
