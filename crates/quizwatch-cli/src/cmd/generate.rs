use chrono::{Duration, TimeZone, Utc};
use clap::Args;
use quizwatch_core::session::{
    AnswerEvent, QuestionSnapshot, QuestionText, SessionRecord, SessionStatus,
};
use quizwatch_core::store::JsonDirStore;
use quizwatch_core::{QwError, QwResult};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

const VOCAB: &[&str] = &[
    "which", "river", "capital", "element", "year", "treaty", "author", "planet", "formula",
    "battle", "symbol", "largest", "first", "country", "language", "invented", "ocean", "theory",
];

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Output directory; created if missing.
    #[arg(short, long)]
    pub dir: PathBuf,

    #[arg(short = 'n', long, default_value_t = 50)]
    pub sessions: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(short, long, default_value_t = 20)]
    pub questions: usize,

    /// Share of sessions written as implausibly fast takers.
    #[arg(long, default_value_t = 0.2)]
    pub fast_share: f64,
}

fn sentence(rng: &mut fastrand::Rng, words: usize) -> String {
    (0..words)
        .map(|_| VOCAB[rng.usize(..VOCAB.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn synth_session(
    id: String,
    questions: usize,
    fast: bool,
    rng: &mut fastrand::Rng,
) -> SessionRecord {
    let mut snapshot = QuestionSnapshot::new();
    let mut points = Vec::with_capacity(questions);
    for q in 0..questions {
        let words = rng.usize(3..24);
        let answer_words = rng.usize(1..4);
        snapshot.insert(
            format!("q{:03}", q),
            QuestionText::new(sentence(rng, words), sentence(rng, answer_words)),
        );
        points.push(rng.u32(1..=8));
    }

    let start = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_else(Utc::now);
    let mut clock = start;
    let mut answers = Vec::with_capacity(questions);

    for (q, &pts) in points.iter().enumerate() {
        let (time, correct) = if fast {
            (rng.f64() * 2.5, rng.f64() < 0.95)
        } else {
            (4.0 + rng.f64() * 40.0, rng.f64() < 0.7)
        };
        // Keep two decimals so files stay readable.
        let time = (time * 100.0).round() / 100.0;
        clock += Duration::milliseconds((time * 1000.0) as i64 + 500);

        answers.push(
            AnswerEvent::builder()
                .id(format!("{}-a{:03}", id, q))
                .question_id(format!("q{:03}", q))
                .points_possible(pts)
                .time_spent_seconds(time)
                .is_correct(correct)
                .show_answer_used(!fast && rng.f64() < 0.05)
                .answered_at(clock)
                .build(),
        );
    }

    let mut record = SessionRecord::new(id, snapshot);
    record.answers = answers;
    record.status = SessionStatus::Completed;
    record
}

pub fn run(args: &GenerateArgs) -> QwResult<()> {
    if !(0.0..=1.0).contains(&args.fast_share) {
        return Err(QwError::Validation(format!(
            "fast_share must lie in [0, 1], got {}",
            args.fast_share
        )));
    }

    let store = JsonDirStore::create(&args.dir)?;
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    info!(
        "🎲 Generating {} sessions x {} questions into {:?} (seed {})",
        args.sessions, args.questions, store.root(), seed
    );

    // One RNG per session so the output does not depend on thread scheduling.
    let fast_count = (0..args.sessions)
        .into_par_iter()
        .map(|i| {
            let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(i as u64));
            let fast = rng.f64() < args.fast_share;
            let id = format!("session-{:04}", i);
            let record = synth_session(id, args.questions, fast, &mut rng);
            store.write_record(&record).map(|_| fast as usize)
        })
        .collect::<QwResult<Vec<usize>>>()?
        .into_iter()
        .sum::<usize>();

    info!("✅ Wrote {} sessions ({} fast takers)", args.sessions, fast_count);
    Ok(())
}
