use super::signals::SessionSignals;
use crate::config::SuspicionPolicy;
use crate::suspicion::{SessionSuspicionResult, SuspicionStatus, SuspicionSummary};

/// Unrounded rates. Scoring always reads these, never the rounded summary.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SignalRates {
    pub fast_correct: f64,
    pub ultra_fast: f64,
    pub zero_one: f64,
    pub show_answer_fast: f64,
    pub high_point_ultra_fast: f64,
    pub wordy_ultra_fast: f64,
    pub time_ratio_low: f64,
    pub fast2_share: f64,
    pub fast2_accuracy: f64,
}

impl SignalRates {
    pub fn from_signals(s: &SessionSignals) -> Self {
        let c = &s.counters;
        if c.total == 0 {
            return Self::default();
        }
        let total = c.total as f64;
        let rate = |n: u32| n as f64 / total;

        Self {
            fast_correct: rate(c.fast_correct),
            ultra_fast: rate(c.ultra_fast),
            zero_one: rate(c.zero_one),
            show_answer_fast: rate(c.show_answer_fast),
            high_point_ultra_fast: rate(c.high_point_ultra_fast),
            wordy_ultra_fast: rate(c.wordy_ultra_fast),
            time_ratio_low: rate(c.time_ratio_low),
            fast2_share: rate(c.fast2_total),
            fast2_accuracy: if c.fast2_total > 0 {
                c.fast2_correct as f64 / c.fast2_total as f64
            } else {
                0.0
            },
        }
    }
}

/// Rounds half away from zero to 3 decimals.
#[inline]
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

pub fn speed_accuracy_flag(rates: &SignalRates, policy: &SuspicionPolicy) -> bool {
    rates.fast2_share >= policy.speed_share_min && rates.fast2_accuracy >= policy.speed_accuracy_min
}

pub fn streak_or_block_flag(signals: &SessionSignals, policy: &SuspicionPolicy) -> bool {
    signals.max_streak >= policy.streak_min
        || signals.window_fast_dense
        || signals.window_high_value_dense
}

pub fn weighted_score(
    rates: &SignalRates,
    speed_accuracy: bool,
    streak_or_block: bool,
    policy: &SuspicionPolicy,
) -> f64 {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };

    // Term order is fixed so every caller lands on the same bits.
    let raw = policy.weight_wordy_ultra_fast * rates.wordy_ultra_fast
        + policy.weight_high_point_ultra_fast * rates.high_point_ultra_fast
        + policy.weight_time_ratio_low * rates.time_ratio_low
        + policy.weight_speed_accuracy * flag(speed_accuracy)
        + policy.weight_streak_or_block * flag(streak_or_block);

    raw.min(1.0)
}

pub fn tier_for(score: f64, policy: &SuspicionPolicy) -> SuspicionStatus {
    if score >= policy.red_threshold {
        SuspicionStatus::Red
    } else if score >= policy.amber_threshold {
        SuspicionStatus::Amber
    } else {
        SuspicionStatus::Green
    }
}

pub fn synthesize(signals: &SessionSignals, policy: &SuspicionPolicy) -> SessionSuspicionResult {
    if signals.counters.total == 0 {
        return SessionSuspicionResult::empty();
    }

    let rates = SignalRates::from_signals(signals);
    let score = weighted_score(
        &rates,
        speed_accuracy_flag(&rates, policy),
        streak_or_block_flag(signals, policy),
        policy,
    );

    SessionSuspicionResult {
        status: tier_for(score, policy),
        score,
        summary: SuspicionSummary {
            fast_correct_rate: round3(rates.fast_correct),
            ultra_fast_rate: round3(rates.ultra_fast),
            zero_one_rate: round3(rates.zero_one),
            show_answer_fast_rate: round3(rates.show_answer_fast),
            high_point_ultra_fast_rate: round3(rates.high_point_ultra_fast),
            wordy_ultra_fast_rate: round3(rates.wordy_ultra_fast),
            time_ratio_low_rate: round3(rates.time_ratio_low),
            fast2_share: round3(rates.fast2_share),
            fast2_accuracy: round3(rates.fast2_accuracy),
            max_consecutive_fast2_or_less: signals.max_streak,
            window_fast3_or_less_dense: signals.window_fast_dense,
            window_high_value_fast_dense: signals.window_high_value_dense,
            total_questions: signals.counters.total,
        },
    }
}
