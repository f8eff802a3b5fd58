use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};
use typed_builder::TypedBuilder;

use crate::suspicion::SessionSuspicionResult;

/// One answered question, as logged by the quiz client.
///
/// Every scoring input is optional on the wire; the accessors apply the
/// defaults (`1` point, `0` seconds, not correct, show-answer unused).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    #[serde(default)]
    #[builder(default, setter(into))]
    pub id: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub question_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub points_possible: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub time_spent_seconds: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub is_correct: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub show_answer_used: Option<bool>,

    // Ordering only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub answered_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub created_at: Option<DateTime<Utc>>,
}

impl AnswerEvent {
    #[inline]
    pub fn points(&self) -> u32 {
        self.points_possible.unwrap_or(1)
    }

    #[inline]
    pub fn time_spent(&self) -> f64 {
        self.time_spent_seconds.unwrap_or(0.0)
    }

    #[inline]
    pub fn correct(&self) -> bool {
        self.is_correct.unwrap_or(false)
    }

    #[inline]
    pub fn show_answer(&self) -> bool {
        self.show_answer_used.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionText {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl QuestionText {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
        }
    }
}

/// Question text as it was presented when the session was created.
///
/// Scoring reads this snapshot and never the live question bank, so a
/// verdict can be reproduced after the bank has been edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSnapshot(BTreeMap<String, QuestionText>);

impl QuestionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionText> {
        self.0.get(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, text: QuestionText) {
        self.0.insert(question_id.into(), text);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QuestionText)> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, QuestionText)> for QuestionSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, QuestionText)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
}

/// Everything a store knows about one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub questions: QuestionSnapshot,
    #[serde(default)]
    pub answers: Vec<AnswerEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicion: Option<SessionSuspicionResult>,
}

impl SessionRecord {
    pub fn new(id: impl Into<String>, questions: QuestionSnapshot) -> Self {
        Self {
            id: id.into(),
            status: SessionStatus::InProgress,
            questions,
            answers: Vec::new(),
            suspicion: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
