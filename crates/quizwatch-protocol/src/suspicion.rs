use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Discrete verdict, ordered by severity (`Green < Amber < Red`).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuspicionStatus {
    #[default]
    Green,
    Amber,
    Red,
}

// Field names are a wire contract shared by every writer of a verdict.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspicionSummary {
    pub fast_correct_rate: f64,
    pub ultra_fast_rate: f64,
    pub zero_one_rate: f64,
    pub show_answer_fast_rate: f64,
    pub high_point_ultra_fast_rate: f64,
    pub wordy_ultra_fast_rate: f64,
    pub time_ratio_low_rate: f64,

    pub fast2_share: f64,
    pub fast2_accuracy: f64,

    pub max_consecutive_fast2_or_less: u32,
    pub window_fast3_or_less_dense: bool,
    pub window_high_value_fast_dense: bool,

    pub total_questions: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSuspicionResult {
    pub status: SuspicionStatus,
    pub score: f64,
    pub summary: SuspicionSummary,
}

impl SessionSuspicionResult {
    /// Verdict for a session with no answers.
    pub fn empty() -> Self {
        Self::default()
    }
}
