use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Every constant the suspicion engine reads.
///
/// `Default` is the canonical policy. Both the batch recompute and the
/// completion hook score with it unless an operator explicitly overrides a
/// value, and the policy fingerprint is reported alongside results so that
/// verdicts produced under different rules can be told apart.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspicionPolicy {
    // === EXPECTED TIME ===
    #[arg(long, default_value_t = 2.0)]
    pub min_expected_floor_secs: f64,
    #[arg(long, default_value_t = 2.0)]
    pub min_expected_secs_per_point: f64,
    #[arg(long, default_value_t = 0.2)]
    pub expected_secs_per_word: f64,

    // === ANSWER PREDICATES ===
    #[arg(long, default_value_t = 2.0)]
    pub ultra_fast_secs: f64,
    #[arg(long, default_value_t = 1.0)]
    pub zero_one_secs: f64,
    #[arg(long, default_value_t = 3.0)]
    pub block_fast_secs: f64,
    #[arg(long, default_value_t = 4)]
    pub high_point_min: u32,
    #[arg(long, default_value_t = 14)]
    pub wordy_min_words: u32,
    #[arg(long, default_value_t = 0.3)]
    pub time_ratio_low_max: f64,

    // === STREAK & WINDOW ===
    #[arg(long, default_value_t = 5)]
    pub streak_min: u32,
    #[arg(long, default_value_t = 10)]
    pub window_size: usize,
    #[arg(long, default_value_t = 8)]
    pub window_fast_min: usize,
    #[arg(long, default_value_t = 6)]
    pub window_high_value_points: u32,
    #[arg(long, default_value_t = 3)]
    pub window_high_value_min: usize,

    // === SPEED vs ACCURACY ===
    #[arg(long, default_value_t = 0.3)]
    pub speed_share_min: f64,
    #[arg(long, default_value_t = 0.9)]
    pub speed_accuracy_min: f64,

    // === SCORE WEIGHTS ===
    #[arg(long, default_value_t = 0.30)]
    pub weight_wordy_ultra_fast: f64,
    #[arg(long, default_value_t = 0.25)]
    pub weight_high_point_ultra_fast: f64,
    #[arg(long, default_value_t = 0.20)]
    pub weight_time_ratio_low: f64,
    #[arg(long, default_value_t = 0.15)]
    pub weight_speed_accuracy: f64,
    #[arg(long, default_value_t = 0.10)]
    pub weight_streak_or_block: f64,

    // === TIERS ===
    #[arg(long, default_value_t = 0.15)]
    pub amber_threshold: f64,
    #[arg(long, default_value_t = 0.25)]
    pub red_threshold: f64,
}

impl Default for SuspicionPolicy {
    fn default() -> Self {
        Self {
            min_expected_floor_secs: 2.0,
            min_expected_secs_per_point: 2.0,
            expected_secs_per_word: 0.2,

            ultra_fast_secs: 2.0,
            zero_one_secs: 1.0,
            block_fast_secs: 3.0,
            high_point_min: 4,
            wordy_min_words: 14,
            time_ratio_low_max: 0.3,

            streak_min: 5,
            window_size: 10,
            window_fast_min: 8,
            window_high_value_points: 6,
            window_high_value_min: 3,

            speed_share_min: 0.3,
            speed_accuracy_min: 0.9,

            weight_wordy_ultra_fast: 0.30,
            weight_high_point_ultra_fast: 0.25,
            weight_time_ratio_low: 0.20,
            weight_speed_accuracy: 0.15,
            weight_streak_or_block: 0.10,

            amber_threshold: 0.15,
            red_threshold: 0.25,
        }
    }
}

impl SuspicionPolicy {
    pub fn weights(&self) -> [f64; 5] {
        [
            self.weight_wordy_ultra_fast,
            self.weight_high_point_ultra_fast,
            self.weight_time_ratio_low,
            self.weight_speed_accuracy,
            self.weight_streak_or_block,
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window_size must be at least 1".into());
        }
        if self.window_fast_min > self.window_size || self.window_high_value_min > self.window_size {
            return Err(format!(
                "window minimums ({}, {}) cannot exceed window_size {}",
                self.window_fast_min, self.window_high_value_min, self.window_size
            ));
        }

        let secs = [
            ("min_expected_floor_secs", self.min_expected_floor_secs),
            ("min_expected_secs_per_point", self.min_expected_secs_per_point),
            ("expected_secs_per_word", self.expected_secs_per_word),
            ("ultra_fast_secs", self.ultra_fast_secs),
            ("zero_one_secs", self.zero_one_secs),
            ("block_fast_secs", self.block_fast_secs),
            ("time_ratio_low_max", self.time_ratio_low_max),
        ];
        for (name, v) in secs {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, v));
            }
        }

        for (i, w) in self.weights().iter().enumerate() {
            if !w.is_finite() || *w < 0.0 {
                return Err(format!("score weight #{} must be non-negative, got {}", i + 1, w));
            }
        }

        let ratios = [
            ("speed_share_min", self.speed_share_min),
            ("speed_accuracy_min", self.speed_accuracy_min),
            ("amber_threshold", self.amber_threshold),
            ("red_threshold", self.red_threshold),
        ];
        for (name, v) in ratios {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{} must lie in [0, 1], got {}", name, v));
            }
        }
        if self.amber_threshold > self.red_threshold {
            return Err(format!(
                "amber_threshold ({}) is above red_threshold ({})",
                self.amber_threshold, self.red_threshold
            ));
        }

        Ok(())
    }

    /// Deterministic SHA-256 over the serialized policy.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&json);
        hex::encode(hasher.finalize())
    }

    pub fn merge_from_cli(&mut self, cli_policy: &SuspicionPolicy, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_policy.$field;
                }
            };
        }

        update_if_present!(min_expected_floor_secs);
        update_if_present!(min_expected_secs_per_point);
        update_if_present!(expected_secs_per_word);

        update_if_present!(ultra_fast_secs);
        update_if_present!(zero_one_secs);
        update_if_present!(block_fast_secs);
        update_if_present!(high_point_min);
        update_if_present!(wordy_min_words);
        update_if_present!(time_ratio_low_max);

        update_if_present!(streak_min);
        update_if_present!(window_size);
        update_if_present!(window_fast_min);
        update_if_present!(window_high_value_points);
        update_if_present!(window_high_value_min);

        update_if_present!(speed_share_min);
        update_if_present!(speed_accuracy_min);

        update_if_present!(weight_wordy_ultra_fast);
        update_if_present!(weight_high_point_ultra_fast);
        update_if_present!(weight_time_ratio_low);
        update_if_present!(weight_speed_accuracy);
        update_if_present!(weight_streak_or_block);

        update_if_present!(amber_threshold);
        update_if_present!(red_threshold);
    }
}
