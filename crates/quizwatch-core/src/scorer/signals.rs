use super::features::FeatureRecord;
use crate::config::SuspicionPolicy;
use std::collections::VecDeque;

/// Raw counts gathered over one session. Rates are derived later.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SignalCounters {
    pub total: u32,
    pub fast_correct: u32,
    pub ultra_fast: u32,
    pub zero_one: u32,
    pub show_answer_fast: u32,
    pub high_point_ultra_fast: u32,
    pub wordy_ultra_fast: u32,
    pub time_ratio_low: u32,
    pub fast2_total: u32,
    pub fast2_correct: u32,
}

/// Final state of the fold, handed to the synthesizer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSignals {
    pub counters: SignalCounters,
    pub max_streak: u32,
    pub window_fast_dense: bool,
    pub window_high_value_dense: bool,
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    time: f64,
    points: u32,
}

/// Single forward pass over feature records.
///
/// Keeps running counters, the current/longest run of answers at or under
/// the ultra-fast bound, and a trailing window of the most recent
/// `window_size` answers. The window is re-scanned after every push and the
/// two density flags latch once raised.
pub struct SignalAccumulator<'a> {
    policy: &'a SuspicionPolicy,
    counters: SignalCounters,
    current_streak: u32,
    max_streak: u32,
    window: VecDeque<WindowEntry>,
    window_fast_dense: bool,
    window_high_value_dense: bool,
}

impl<'a> SignalAccumulator<'a> {
    pub fn new(policy: &'a SuspicionPolicy) -> Self {
        Self {
            policy,
            counters: SignalCounters::default(),
            current_streak: 0,
            max_streak: 0,
            window: VecDeque::with_capacity(policy.window_size),
            window_fast_dense: false,
            window_high_value_dense: false,
        }
    }

    pub fn push(&mut self, r: &FeatureRecord) {
        let p = self.policy;
        let c = &mut self.counters;

        let ultra = r.time <= p.ultra_fast_secs;
        let block_fast = r.time <= p.block_fast_secs;

        c.total += 1;

        if r.correct {
            if r.time > 0.0 && r.time < r.min_expected_seconds {
                c.fast_correct += 1;
            }
            if ultra {
                c.ultra_fast += 1;
            }
            if r.time <= p.zero_one_secs {
                c.zero_one += 1;
            }
            if r.show_answer_used && ultra {
                c.show_answer_fast += 1;
            }
            if r.points >= p.high_point_min && block_fast {
                c.high_point_ultra_fast += 1;
            }
            if r.word_count >= p.wordy_min_words && ultra {
                c.wordy_ultra_fast += 1;
            }
            if r.expected_seconds > 0.0 && r.time / r.expected_seconds <= p.time_ratio_low_max {
                c.time_ratio_low += 1;
            }
        }

        if ultra {
            c.fast2_total += 1;
            if r.correct {
                c.fast2_correct += 1;
            }
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }

        self.push_window(r);
    }

    fn push_window(&mut self, r: &FeatureRecord) {
        if self.window.len() == self.policy.window_size {
            self.window.pop_front();
        }
        self.window.push_back(WindowEntry {
            time: r.time,
            points: r.points,
        });

        let block = self.policy.block_fast_secs;
        let fast = self.window.iter().filter(|w| w.time <= block).count();
        let high_value = self
            .window
            .iter()
            .filter(|w| w.points >= self.policy.window_high_value_points && w.time <= block)
            .count();

        if fast >= self.policy.window_fast_min {
            self.window_fast_dense = true;
        }
        if high_value >= self.policy.window_high_value_min {
            self.window_high_value_dense = true;
        }
    }

    /// Flag state after the most recent push.
    pub fn window_flags(&self) -> (bool, bool) {
        (self.window_fast_dense, self.window_high_value_dense)
    }

    pub fn counters(&self) -> &SignalCounters {
        &self.counters
    }

    pub fn finish(self) -> SessionSignals {
        SessionSignals {
            counters: self.counters,
            max_streak: self.max_streak,
            window_fast_dense: self.window_fast_dense,
            window_high_value_dense: self.window_high_value_dense,
        }
    }
}

pub fn accumulate(records: &[FeatureRecord], policy: &SuspicionPolicy) -> SessionSignals {
    let mut acc = SignalAccumulator::new(policy);
    for r in records {
        acc.push(r);
    }
    acc.finish()
}
