use chrono::{TimeZone, Utc};
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::ordering::{order_events, ordered};
use quizwatch_core::scorer::features::normalize;
use quizwatch_core::scorer::signals::accumulate;
use quizwatch_core::scorer::score_session;
use quizwatch_core::session::{AnswerEvent, QuestionSnapshot};

mod common;
use common::answers;

fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn event(id: &str, answered: Option<i64>, created: Option<i64>) -> AnswerEvent {
    AnswerEvent {
        id: id.to_string(),
        question_id: String::new(),
        points_possible: None,
        time_spent_seconds: None,
        is_correct: None,
        show_answer_used: None,
        answered_at: answered.map(at),
        created_at: created.map(at),
    }
}

fn ids(events: &[AnswerEvent]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

// --- TOTAL ORDER ---

#[test]
fn test_answered_at_is_primary_key() {
    let log = vec![
        event("c", Some(30), Some(0)),
        event("a", Some(10), Some(99)),
        event("b", Some(20), Some(50)),
    ];
    assert_eq!(ids(&ordered(&log)), vec!["a", "b", "c"]);
}

#[test]
fn test_ties_fall_back_to_created_at_then_id() {
    let log = vec![
        event("z", Some(10), Some(2)),
        event("y", Some(10), Some(1)),
        event("b", Some(10), Some(3)),
        event("a", Some(10), Some(3)),
    ];
    assert_eq!(ids(&ordered(&log)), vec!["y", "z", "a", "b"]);
}

#[test]
fn test_missing_timestamps_sort_last_in_id_order() {
    let mut log = vec![
        event("n2", None, None),
        event("t1", Some(5), None),
        event("n1", None, None),
        event("c1", None, Some(1)),
        event("t0", Some(1), Some(1)),
    ];
    order_events(&mut log);
    assert_eq!(ids(&log), vec!["t0", "t1", "c1", "n1", "n2"]);
}

// --- ORDER SENSITIVITY ---

#[test]
fn test_permutation_moves_streak_but_not_counters() {
    let policy = SuspicionPolicy::default();
    let snap = QuestionSnapshot::new();

    let grouped = answers(&[1.0, 1.0, 1.0, 1.0, 1.0, 30.0, 30.0, 30.0, 30.0, 30.0]);
    let alternating = answers(&[1.0, 30.0, 1.0, 30.0, 1.0, 30.0, 1.0, 30.0, 1.0, 30.0]);

    let a = accumulate(&normalize(&grouped, &snap, &policy), &policy);
    let b = accumulate(&normalize(&alternating, &snap, &policy), &policy);

    assert_eq!(a.counters, b.counters);
    assert_eq!(a.max_streak, 5);
    assert_eq!(b.max_streak, 1);

    // The run of five is enough on its own to lift the session a tier band.
    let ra = score_session(&grouped, &snap);
    let rb = score_session(&alternating, &snap);
    assert!(ra.score > rb.score);
    assert_eq!(ra.summary.ultra_fast_rate, rb.summary.ultra_fast_rate);
}

#[test]
fn test_permutation_moves_block_across_window_boundary() {
    let policy = SuspicionPolicy::default();
    let snap = QuestionSnapshot::new();

    // Eight 3s answers together fit inside one ten-answer window.
    let mut inside = vec![3.0; 8];
    inside.extend([60.0; 8]);

    // Same multiset, split 4 + 4 with the slow block between them.
    let mut across = vec![3.0; 4];
    across.extend([60.0; 8]);
    across.extend([3.0; 4]);

    let a = accumulate(&normalize(&answers(&inside), &snap, &policy), &policy);
    let b = accumulate(&normalize(&answers(&across), &snap, &policy), &policy);

    assert_eq!(a.counters, b.counters);
    assert!(a.window_fast_dense);
    assert!(!b.window_fast_dense);
}
