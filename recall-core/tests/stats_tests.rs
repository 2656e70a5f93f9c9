use chrono::{DateTime, Duration, TimeZone, Utc};
use recall_core::{StreakSink, StreakTracker};
use uuid::Uuid;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn daily_counters_accumulate() {
    let tracker = StreakTracker::new();
    let user = Uuid::new_v4();
    let now = noon();

    tracker.record_review(user, now, true).await.unwrap();
    tracker.record_review(user, now, false).await.unwrap();
    tracker.record_review(user, now, true).await.unwrap();

    let stat = tracker.stats_for(user, now.date_naive());
    assert_eq!(stat.cards_reviewed, 3);
    assert_eq!(stat.reviews_correct, 2);
    assert_eq!(stat.study_streak_day, 1);
}

#[tokio::test]
async fn streak_counts_consecutive_days_only() {
    let tracker = StreakTracker::new();
    let user = Uuid::new_v4();
    let now = noon();

    tracker.record_review(user, now - Duration::days(2), true).await.unwrap();
    tracker.record_review(user, now - Duration::days(1), false).await.unwrap();
    tracker.record_review(user, now, true).await.unwrap();

    assert_eq!(tracker.streak(user, now.date_naive()), 3);

    // a gap resets the walk
    tracker.record_review(user, now + Duration::days(2), true).await.unwrap();
    assert_eq!(tracker.streak(user, (now + Duration::days(2)).date_naive()), 1);
}

#[tokio::test]
async fn users_do_not_share_streaks() {
    let tracker = StreakTracker::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let now = noon();

    tracker.record_review(a, now, true).await.unwrap();

    assert_eq!(tracker.streak(a, now.date_naive()), 1);
    assert_eq!(tracker.streak(b, now.date_naive()), 0);
    assert_eq!(tracker.stats_for(b, now.date_naive()).cards_reviewed, 0);
}
