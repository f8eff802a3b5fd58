#![allow(dead_code)]

use quizwatch_core::session::{
    AnswerEvent, QuestionSnapshot, QuestionText, SessionRecord, SessionStatus,
};

/// Correct answer to a 1-point question with no snapshot entry.
pub fn answer(time: f64) -> AnswerEvent {
    AnswerEvent::builder()
        .question_id("missing")
        .time_spent_seconds(time)
        .is_correct(true)
        .points_possible(1)
        .build()
}

pub fn answer_with(time: f64, correct: bool, points: u32) -> AnswerEvent {
    AnswerEvent::builder()
        .question_id("missing")
        .time_spent_seconds(time)
        .is_correct(correct)
        .points_possible(points)
        .build()
}

pub fn answers(times: &[f64]) -> Vec<AnswerEvent> {
    times
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let mut ev = answer(t);
            ev.id = format!("a{:03}", i);
            ev
        })
        .collect()
}

/// A question whose text and answer together hold `words` words.
pub fn wordy_question(words: usize) -> QuestionText {
    let question = vec!["word"; words.saturating_sub(1)].join(" ");
    QuestionText::new(question, "answer")
}

pub fn snapshot(entries: &[(&str, QuestionText)]) -> QuestionSnapshot {
    entries
        .iter()
        .map(|(id, q)| (id.to_string(), q.clone()))
        .collect()
}

pub fn completed_session(id: &str, events: Vec<AnswerEvent>) -> SessionRecord {
    let mut record = SessionRecord::new(id, QuestionSnapshot::new());
    record.answers = events;
    record.status = SessionStatus::Completed;
    record
}
