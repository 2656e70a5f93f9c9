use chrono::{DateTime, Duration, TimeZone, Utc};
use recall_core::{apply_review, CardScheduleState, Grade, SchedulerError, EF_MIN};
use uuid::Uuid;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

fn new_state() -> CardScheduleState {
    CardScheduleState::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), noon())
}

fn grade(v: u8) -> Grade {
    Grade::new(v).unwrap()
}

#[test]
fn grade_validation() {
    for v in 0..=5 {
        assert!(Grade::new(v).is_ok());
    }
    assert!(matches!(
        Grade::new(6),
        Err(SchedulerError::InvalidGrade(6))
    ));
    assert!(!grade(2).passed());
    assert!(grade(3).passed());
}

#[test]
fn new_card_progression() {
    let now = noon();
    let s0 = new_state();

    // grade 4 leaves ease untouched: 0.1 - 1 * (0.08 + 0.02) == 0
    let s1 = apply_review(&s0, grade(4), now);
    assert_eq!(s1.repetition_count, 1);
    assert_eq!(s1.interval_days, 1);
    assert!((s1.ease_factor - 2.5).abs() < 1e-6);
    assert_eq!(s1.due_at, now + Duration::days(1));
    assert_eq!(s1.last_reviewed_at, Some(now));

    let s2 = apply_review(&s1, grade(5), now + Duration::days(1));
    assert_eq!(s2.repetition_count, 2);
    assert_eq!(s2.interval_days, 6);
    assert!((s2.ease_factor - 2.6).abs() < 1e-6);

    // failure collapses the streak but keeps the lapse tally
    let s3 = apply_review(&s2, grade(2), now + Duration::days(7));
    assert_eq!(s3.repetition_count, 0);
    assert_eq!(s3.interval_days, 1);
    assert_eq!(s3.lapse_count, 1);
    assert!(s3.ease_factor < s2.ease_factor);
    assert!(s3.ease_factor >= EF_MIN);
}

#[test]
fn mature_interval_grows_by_ease() {
    let now = noon();
    let mut s = new_state();
    s.repetition_count = 3;
    s.interval_days = 6;

    // ease stays 2.5 on grade 4, so 6 * 2.5 rounds to 15
    let next = apply_review(&s, grade(4), now);
    assert_eq!(next.repetition_count, 4);
    assert_eq!(next.interval_days, 15);

    // grade 5 bumps ease to 2.6 first: round(6 * 2.6) == 16
    let next = apply_review(&s, grade(5), now);
    assert_eq!(next.interval_days, 16);
}

#[test]
fn interval_growth_is_strict_even_at_ease_floor() {
    let now = noon();
    let mut s = new_state();
    s.repetition_count = 5;
    s.interval_days = 1;
    s.ease_factor = EF_MIN;

    // round(1 * 1.3) == 1 would stall; the floor forces interval + 1
    let next = apply_review(&s, grade(3), now);
    assert!((next.ease_factor - EF_MIN).abs() < 1e-6);
    assert_eq!(next.interval_days, 2);
}

#[test]
fn long_run_success_intervals_strictly_increase() {
    let mut now = noon();
    let mut s = new_state();
    for _ in 0..3 {
        s = apply_review(&s, grade(4), now);
        now += Duration::days(i64::from(s.interval_days));
    }
    for _ in 0..20 {
        let prev_interval = s.interval_days;
        s = apply_review(&s, grade(3), now);
        assert!(s.interval_days > prev_interval);
        now += Duration::days(i64::from(s.interval_days));
    }
}

#[test]
fn ease_never_drops_below_floor() {
    let mut now = noon();
    let mut s = new_state();
    for i in 0..10 {
        s = apply_review(&s, grade(0), now);
        assert!(s.ease_factor >= EF_MIN);
        assert_eq!(s.repetition_count, 0);
        assert_eq!(s.interval_days, 1);
        assert_eq!(s.lapse_count, i + 1);
        now += Duration::days(1);
    }
}

#[test]
fn failure_collapses_any_interval_to_one_day() {
    let now = noon();
    let mut s = new_state();
    s.repetition_count = 7;
    s.interval_days = 120;
    s.lapse_count = 2;

    let next = apply_review(&s, grade(1), now);
    assert_eq!(next.repetition_count, 0);
    assert_eq!(next.interval_days, 1);
    assert_eq!(next.lapse_count, 3);
    assert_eq!(next.due_at, now + Duration::days(1));
}

#[test]
fn reviewed_card_is_never_due_same_day() {
    let now = noon();
    for v in 0..=5 {
        let next = apply_review(&new_state(), grade(v), now);
        assert!(next.interval_days >= 1);
        assert!(next.due_at > now);
    }
}

#[test]
fn update_is_deterministic() {
    let now = noon();
    let s = new_state();
    for v in 0..=5 {
        let a = apply_review(&s, grade(v), now);
        let b = apply_review(&s, grade(v), now);
        assert_eq!(a, b);
    }
}
