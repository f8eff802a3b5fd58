use crate::config::SuspicionPolicy;
use crate::session::{AnswerEvent, QuestionSnapshot};

/// Per-answer view the accumulator folds over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    pub points: u32,
    pub time: f64,
    pub correct: bool,
    pub show_answer_used: bool,
    pub word_count: u32,
    pub min_expected_seconds: f64,
    pub expected_seconds: f64,
}

pub fn word_count(text: Option<&str>) -> u32 {
    text.map_or(0, |t| t.split_whitespace().count() as u32)
}

impl FeatureRecord {
    pub fn from_event(
        event: &AnswerEvent,
        questions: &QuestionSnapshot,
        policy: &SuspicionPolicy,
    ) -> Self {
        let points = event.points();

        // Unknown question ids count as zero words.
        let word_count = questions.get(&event.question_id).map_or(0, |q| {
            word_count(q.question.as_deref()) + word_count(q.answer.as_deref())
        });

        let min_expected_seconds = policy
            .min_expected_floor_secs
            .max(policy.min_expected_secs_per_point * points as f64);
        let expected_seconds =
            min_expected_seconds + policy.expected_secs_per_word * word_count as f64;

        Self {
            points,
            time: event.time_spent(),
            correct: event.correct(),
            show_answer_used: event.show_answer(),
            word_count,
            min_expected_seconds,
            expected_seconds,
        }
    }
}

/// Maps every event to exactly one record, preserving order.
pub fn normalize(
    events: &[AnswerEvent],
    questions: &QuestionSnapshot,
    policy: &SuspicionPolicy,
) -> Vec<FeatureRecord> {
    events
        .iter()
        .map(|e| FeatureRecord::from_event(e, questions, policy))
        .collect()
}
