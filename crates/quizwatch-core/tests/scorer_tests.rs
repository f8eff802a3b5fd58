use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::scorer::signals::{SessionSignals, SignalCounters};
use quizwatch_core::scorer::synthesis::{round3, synthesize, tier_for};
use quizwatch_core::scorer::{score_session, SuspicionEngine};
use quizwatch_core::session::{AnswerEvent, QuestionSnapshot};
use quizwatch_core::suspicion::{SessionSuspicionResult, SuspicionStatus};
use quizwatch_core::QwError;
use rstest::rstest;

mod common;
use common::{answer, answer_with, answers, completed_session, snapshot, wordy_question};

fn signals(counters: SignalCounters) -> SessionSignals {
    SessionSignals {
        counters,
        ..Default::default()
    }
}

// --- SCENARIOS ---

#[test]
fn test_empty_log_baseline() {
    let result = score_session(&[], &QuestionSnapshot::new());

    assert_eq!(result, SessionSuspicionResult::empty());
    assert_eq!(result.status, SuspicionStatus::Green);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.summary.total_questions, 0);
    assert_eq!(result.summary.fast2_accuracy, 0.0);
    assert!(!result.summary.window_fast3_or_less_dense);
    assert!(!result.summary.window_high_value_fast_dense);
}

#[test]
fn test_scenario_all_one_second_answers_is_red() {
    let events = answers(&[1.0; 10]);
    let result = score_session(&events, &QuestionSnapshot::new());
    let s = &result.summary;

    assert_eq!(s.ultra_fast_rate, 1.0);
    assert_eq!(s.zero_one_rate, 1.0);
    assert_eq!(s.fast_correct_rate, 1.0);
    assert_eq!(s.fast2_share, 1.0);
    assert_eq!(s.fast2_accuracy, 1.0);
    assert_eq!(s.time_ratio_low_rate, 0.0); // 1 / 2 = 0.5
    assert_eq!(s.max_consecutive_fast2_or_less, 10);
    assert!(s.window_fast3_or_less_dense);
    assert_eq!(s.total_questions, 10);

    assert_eq!(result.score, 0.25);
    assert_eq!(result.status, SuspicionStatus::Red);
}

#[test]
fn test_scenario_slow_answers_are_green() {
    let events = answers(&[30.0; 10]);
    let result = score_session(&events, &QuestionSnapshot::new());

    assert_eq!(result.score, 0.0);
    assert_eq!(result.status, SuspicionStatus::Green);
    assert_eq!(result.summary.fast_correct_rate, 0.0);
    assert_eq!(result.summary.ultra_fast_rate, 0.0);
    assert_eq!(result.summary.max_consecutive_fast2_or_less, 0);
    assert_eq!(result.summary.total_questions, 10);
}

#[test]
fn test_scenario_single_high_point_ultra_fast_answer() {
    let events = vec![answer_with(2.0, true, 5)];
    let result = score_session(&events, &QuestionSnapshot::new());

    assert_eq!(result.summary.high_point_ultra_fast_rate, 1.0);
    assert!(result.score >= 0.25);
    assert_eq!(result.status, SuspicionStatus::Red);
}

#[test]
fn test_high_point_term_alone_lands_exactly_on_red() {
    let policy = SuspicionPolicy::default();
    let s = signals(SignalCounters {
        total: 1,
        high_point_ultra_fast: 1,
        ..Default::default()
    });
    let result = synthesize(&s, &policy);

    assert_eq!(result.score, 0.25);
    assert_eq!(result.status, SuspicionStatus::Red);
}

#[test]
fn test_speed_accuracy_alone_is_amber() {
    let policy = SuspicionPolicy::default();
    // 3 of 10 answers at <=2s, all correct: share 0.3, accuracy 1.0
    let s = signals(SignalCounters {
        total: 10,
        fast2_total: 3,
        fast2_correct: 3,
        ..Default::default()
    });
    let result = synthesize(&s, &policy);

    assert_eq!(result.score, 0.15);
    assert_eq!(result.status, SuspicionStatus::Amber);
    assert_eq!(result.summary.fast2_share, 0.3);
}

#[test]
fn test_speed_accuracy_requires_both_conditions() {
    let policy = SuspicionPolicy::default();
    // share 0.3 but accuracy 8/9 < 0.9
    let s = signals(SignalCounters {
        total: 30,
        fast2_total: 9,
        fast2_correct: 8,
        ..Default::default()
    });
    assert_eq!(synthesize(&s, &policy).score, 0.0);
}

#[test]
fn test_streak_alone_is_green() {
    let policy = SuspicionPolicy::default();
    let s = SessionSignals {
        counters: SignalCounters {
            total: 100,
            ..Default::default()
        },
        max_streak: 5,
        ..Default::default()
    };
    let result = synthesize(&s, &policy);
    assert_eq!(result.score, 0.10);
    assert_eq!(result.status, SuspicionStatus::Green);
}

#[test]
fn test_score_is_clamped_to_one() {
    let policy = SuspicionPolicy {
        weight_wordy_ultra_fast: 0.9,
        weight_high_point_ultra_fast: 0.9,
        ..Default::default()
    };
    let s = signals(SignalCounters {
        total: 2,
        wordy_ultra_fast: 2,
        high_point_ultra_fast: 2,
        ..Default::default()
    });
    assert_eq!(synthesize(&s, &policy).score, 1.0);
}

#[test]
fn test_summary_is_rounded_but_score_is_not() {
    let policy = SuspicionPolicy::default();
    let s = signals(SignalCounters {
        total: 3,
        time_ratio_low: 1,
        ..Default::default()
    });
    let result = synthesize(&s, &policy);

    assert_eq!(result.summary.time_ratio_low_rate, 0.333);
    assert_eq!(result.score, 0.20 * (1.0 / 3.0));
}

#[test]
fn test_wordy_answers_drive_score() {
    let snap = snapshot(&[("q", wordy_question(20))]);
    let events: Vec<AnswerEvent> = (0..4)
        .map(|i| {
            AnswerEvent::builder()
                .id(format!("a{}", i))
                .question_id("q")
                .time_spent_seconds(if i == 0 { 2.0 } else { 40.0 })
                .is_correct(true)
                .build()
        })
        .collect();

    let result = score_session(&events, &snap);
    assert_eq!(result.summary.wordy_ultra_fast_rate, 0.25);
    // 2s against 6s expected is a ratio of 0.33, so only the wordy term fires.
    assert_eq!(result.summary.time_ratio_low_rate, 0.0);
    assert!((result.score - 0.075).abs() < 1e-12);
    assert_eq!(result.status, SuspicionStatus::Green);
}

// --- TIERS ---

#[rstest]
#[case(0.0, SuspicionStatus::Green)]
#[case(0.1499, SuspicionStatus::Green)]
#[case(0.15, SuspicionStatus::Amber)]
#[case(0.2499, SuspicionStatus::Amber)]
#[case(0.25, SuspicionStatus::Red)]
#[case(1.0, SuspicionStatus::Red)]
fn test_tier_thresholds(#[case] score: f64, #[case] expected: SuspicionStatus) {
    assert_eq!(tier_for(score, &SuspicionPolicy::default()), expected);
}

#[rstest]
#[case(0.0, 0.0)]
#[case(1.0 / 3.0, 0.333)]
#[case(2.0 / 3.0, 0.667)]
#[case(0.0005, 0.001)]
fn test_round3(#[case] raw: f64, #[case] expected: f64) {
    assert_eq!(round3(raw), expected);
}

// --- ENGINE ENTRY POINTS ---

#[test]
fn test_engine_rejects_invalid_policy() {
    let policy = SuspicionPolicy {
        red_threshold: 0.1,
        ..Default::default()
    };
    assert!(matches!(
        SuspicionEngine::new(policy),
        Err(QwError::Validation(_))
    ));
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_checked_rejects_bad_time(#[case] time: f64) {
    let engine = SuspicionEngine::default();
    let events = vec![answer(time)];
    assert!(matches!(
        engine.evaluate_checked(&events, &QuestionSnapshot::new()),
        Err(QwError::Validation(_))
    ));
}

#[test]
fn test_checked_rejects_zero_points() {
    let engine = SuspicionEngine::default();
    let events = vec![answer_with(4.0, true, 0)];
    assert!(engine
        .evaluate_checked(&events, &QuestionSnapshot::new())
        .is_err());
}

#[test]
fn test_evaluate_session_orders_the_log() {
    use chrono::{TimeZone, Utc};

    let engine = SuspicionEngine::default();
    let at = |s: i64| Utc.timestamp_opt(1_700_000_000 + s, 0).unwrap();

    // Stored out of order: sorted by answeredAt the five fast answers are
    // consecutive, as logged they are split by the slow one.
    let mut events = Vec::new();
    for (i, (t, ts)) in [(1.0, 0), (1.0, 1), (30.0, 9), (1.0, 2), (1.0, 3), (1.0, 4)]
        .into_iter()
        .enumerate()
    {
        let mut ev = answer(t);
        ev.id = format!("a{}", i);
        ev.answered_at = Some(at(ts));
        events.push(ev);
    }
    let session = completed_session("s1", events);

    let result = engine.evaluate_session(&session).unwrap();
    assert_eq!(result.summary.max_consecutive_fast2_or_less, 5);
}

#[test]
fn test_evaluate_session_names_session_on_validation_error() {
    let engine = SuspicionEngine::default();
    let session = completed_session("broken-1", vec![answer(-3.0)]);

    let err = engine.evaluate_session(&session).unwrap_err();
    assert!(err.to_string().contains("broken-1"));
}
