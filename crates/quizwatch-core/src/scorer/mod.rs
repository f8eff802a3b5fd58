pub mod features;
pub mod signals;
pub mod synthesis;

pub use self::features::{normalize, FeatureRecord};
pub use self::signals::{accumulate, SessionSignals, SignalAccumulator, SignalCounters};
pub use self::synthesis::{synthesize, SignalRates};

use crate::config::SuspicionPolicy;
use crate::error::{QwError, QwResult};
use crate::ordering;
use crate::policy::validate_policy;
use crate::session::{AnswerEvent, QuestionSnapshot, SessionRecord};
use crate::suspicion::SessionSuspicionResult;
use tracing::debug;

/// The one implementation both the batch recompute and the completion hook
/// call into.
#[derive(Debug, Clone)]
pub struct SuspicionEngine {
    policy: SuspicionPolicy,
    fingerprint: String,
}

impl Default for SuspicionEngine {
    fn default() -> Self {
        let policy = SuspicionPolicy::default();
        let fingerprint = policy.fingerprint();
        Self {
            policy,
            fingerprint,
        }
    }
}

impl SuspicionEngine {
    pub fn new(policy: SuspicionPolicy) -> QwResult<Self> {
        validate_policy(&policy)?;
        let fingerprint = policy.fingerprint();
        Ok(Self {
            policy,
            fingerprint,
        })
    }

    pub fn policy(&self) -> &SuspicionPolicy {
        &self.policy
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Normalizer → accumulator → synthesizer over an already ordered log.
    pub fn evaluate(
        &self,
        events: &[AnswerEvent],
        questions: &QuestionSnapshot,
    ) -> SessionSuspicionResult {
        let records = normalize(events, questions, &self.policy);
        let signals = accumulate(&records, &self.policy);
        synthesize(&signals, &self.policy)
    }

    /// Rejects values no client can legitimately send, then evaluates.
    pub fn evaluate_checked(
        &self,
        events: &[AnswerEvent],
        questions: &QuestionSnapshot,
    ) -> QwResult<SessionSuspicionResult> {
        validate_events(events)?;
        Ok(self.evaluate(events, questions))
    }

    /// Orders the session's log, then scores it.
    pub fn evaluate_session(&self, session: &SessionRecord) -> QwResult<SessionSuspicionResult> {
        let events = ordering::ordered(&session.answers);
        let result = self
            .evaluate_checked(&events, &session.questions)
            .map_err(|e| match e {
                QwError::Validation(msg) => {
                    QwError::Validation(format!("session '{}': {}", session.id, msg))
                }
                other => other,
            })?;

        debug!(
            "Session {}: {} answers -> {} ({:.4})",
            session.id,
            result.summary.total_questions,
            result.status,
            result.score
        );
        Ok(result)
    }
}

pub fn validate_events(events: &[AnswerEvent]) -> QwResult<()> {
    for (i, e) in events.iter().enumerate() {
        if let Some(t) = e.time_spent_seconds {
            if !t.is_finite() || t < 0.0 {
                return Err(QwError::Validation(format!(
                    "answer #{} ({}) has invalid timeSpentSeconds {}",
                    i, e.id, t
                )));
            }
        }
        if e.points_possible == Some(0) {
            return Err(QwError::Validation(format!(
                "answer #{} ({}) has pointsPossible 0",
                i, e.id
            )));
        }
    }
    Ok(())
}

/// Scores with the canonical policy.
pub fn score_session(
    events: &[AnswerEvent],
    questions: &QuestionSnapshot,
) -> SessionSuspicionResult {
    SuspicionEngine::default().evaluate(events, questions)
}
