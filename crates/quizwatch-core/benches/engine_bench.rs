use criterion::{criterion_group, criterion_main, Criterion};
use quizwatch_core::batch::recompute_all;
use quizwatch_core::scorer::features::normalize;
use quizwatch_core::scorer::signals::accumulate;
use quizwatch_core::session::{
    AnswerEvent, QuestionSnapshot, QuestionText, SessionRecord, SessionStatus,
};
use quizwatch_core::store::MemoryStore;
use quizwatch_core::SuspicionEngine;
use std::hint::black_box;

fn setup_session(id: &str, len: usize) -> SessionRecord {
    let mut questions = QuestionSnapshot::new();
    for q in 0..40 {
        let words = vec!["word"; 4 + q % 20].join(" ");
        questions.insert(format!("q{}", q), QuestionText::new(words, "answer"));
    }

    // Deterministic mix of fast, mid and slow answers.
    let answers: Vec<AnswerEvent> = (0..len)
        .map(|i| {
            AnswerEvent::builder()
                .id(format!("{}-a{:04}", id, i))
                .question_id(format!("q{}", i % 40))
                .points_possible(1 + (i % 7) as u32)
                .time_spent_seconds(((i * 37) % 45) as f64 * 0.5)
                .is_correct(i % 3 != 0)
                .show_answer_used(i % 11 == 0)
                .build()
        })
        .collect();

    let mut record = SessionRecord::new(id, questions);
    record.answers = answers;
    record.status = SessionStatus::Completed;
    record
}

fn criterion_benchmark(c: &mut Criterion) {
    let engine = SuspicionEngine::default();
    let session = setup_session("bench", 500);

    c.bench_function("evaluate_session (500 answers)", |b| {
        b.iter(|| engine.evaluate_session(black_box(&session)))
    });

    c.bench_function("normalize + accumulate (500 answers)", |b| {
        b.iter(|| {
            let records = normalize(
                black_box(&session.answers),
                black_box(&session.questions),
                engine.policy(),
            );
            accumulate(&records, engine.policy())
        })
    });

    let store = MemoryStore::new();
    for s in 0..200 {
        let _ = store.upsert(setup_session(&format!("s{}", s), 60));
    }
    c.bench_function("recompute_all (200 x 60 answers)", |b| {
        b.iter(|| recompute_all(black_box(&store), &engine))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
