use crate::session::AnswerEvent;
use std::cmp::Ordering;

// Present timestamps first, then absent ones.
fn cmp_present_first<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order over an answer log: `answered_at`, then `created_at`, then `id`.
pub fn compare_events(a: &AnswerEvent, b: &AnswerEvent) -> Ordering {
    cmp_present_first(&a.answered_at, &b.answered_at)
        .then_with(|| cmp_present_first(&a.created_at, &b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts in place. Stable, so fully tied events keep their log position.
pub fn order_events(events: &mut [AnswerEvent]) {
    events.sort_by(compare_events);
}

pub fn ordered(events: &[AnswerEvent]) -> Vec<AnswerEvent> {
    let mut out = events.to_vec();
    order_events(&mut out);
    out
}
