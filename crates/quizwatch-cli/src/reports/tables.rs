use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quizwatch_core::batch::BatchReport;
use quizwatch_core::suspicion::{SessionSuspicionResult, SuspicionStatus};
use quizwatch_core::verifier::{AuditEntry, AuditOutcome};

fn status_cell(status: SuspicionStatus) -> Cell {
    let color = match status {
        SuspicionStatus::Green => Color::Green,
        SuspicionStatus::Amber => Color::Yellow,
        SuspicionStatus::Red => Color::Red,
    };
    Cell::new(status.as_ref())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn pct(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn result(session_id: &str, r: &SessionSuspicionResult) {
    let s = &r.summary;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(format!("Session {}", session_id)).add_attribute(Attribute::Bold),
        status_cell(r.status),
    ]);
    table.add_row(vec![
        Cell::new("Score").fg(Color::Cyan),
        Cell::new(format!("{:.4}", r.score)).fg(Color::Cyan),
    ]);

    let rows = [
        ("Answers", s.total_questions.to_string()),
        ("Fast correct", pct(s.fast_correct_rate)),
        ("Ultra fast (<=2s)", pct(s.ultra_fast_rate)),
        ("Zero-one (<=1s)", pct(s.zero_one_rate)),
        ("Show-answer fast", pct(s.show_answer_fast_rate)),
        ("High-point fast", pct(s.high_point_ultra_fast_rate)),
        ("Wordy fast", pct(s.wordy_ultra_fast_rate)),
        ("Low time ratio", pct(s.time_ratio_low_rate)),
        ("Fast share", pct(s.fast2_share)),
        ("Fast accuracy", pct(s.fast2_accuracy)),
        ("Longest fast run", s.max_consecutive_fast2_or_less.to_string()),
        ("Fast-dense window", s.window_fast3_or_less_dense.to_string()),
        ("High-value window", s.window_high_value_fast_dense.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }

    right_align(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn batch(report: &BatchReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Processed").add_attribute(Attribute::Bold),
        Cell::new("Failed").fg(Color::Red),
        Cell::new("Green").fg(Color::Green),
        Cell::new("Amber").fg(Color::Yellow),
        Cell::new("Red").fg(Color::Red),
        Cell::new("Policy"),
    ]);
    table.add_row(vec![
        Cell::new(report.processed),
        Cell::new(report.failures.len()),
        Cell::new(report.tiers.green),
        Cell::new(report.tiers.amber),
        Cell::new(report.tiers.red),
        Cell::new(&report.policy_fingerprint[..12.min(report.policy_fingerprint.len())]),
    ]);
    right_align(&mut table, 0..=4);
    println!("\n{}", table);

    if report.failures.is_empty() {
        return;
    }

    let mut failures = Table::new();
    failures
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    failures.add_row(vec![
        Cell::new("Session").add_attribute(Attribute::Bold),
        Cell::new("Error").fg(Color::Red),
    ]);
    for f in &report.failures {
        failures.add_row(vec![Cell::new(&f.session_id), Cell::new(&f.error)]);
    }
    println!("\n{}", failures);
}

pub fn audit(entries: &[AuditEntry]) {
    let table = audit_table(entries);
    println!("\n{}", table);
}

fn audit_table(entries: &[AuditEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Session").add_attribute(Attribute::Bold),
        Cell::new("Outcome"),
        Cell::new("Stored"),
        Cell::new("Now"),
        Cell::new("Δ Score"),
        Cell::new("Detail"),
    ]);

    for e in entries {
        let now = e.recomputed.as_ref().map(|r| r.status);
        let (outcome, stored, delta, detail) = match &e.outcome {
            // A match means the stored verdict has the recomputed status.
            AuditOutcome::Match => (Cell::new("match").fg(Color::Green), now, None, String::new()),
            AuditOutcome::Missing => (
                Cell::new("missing").fg(Color::Yellow),
                None,
                None,
                "no stored verdict".to_string(),
            ),
            AuditOutcome::Drift {
                stored,
                score_delta,
                summary_changed,
                ..
            } => (
                Cell::new("drift").fg(Color::Red).add_attribute(Attribute::Bold),
                Some(*stored),
                Some(*score_delta),
                if *summary_changed {
                    "summary changed".to_string()
                } else {
                    String::new()
                },
            ),
            AuditOutcome::Failed { error } => {
                (Cell::new("failed").fg(Color::Red), None, None, error.clone())
            }
        };

        table.add_row(vec![
            Cell::new(&e.session_id),
            outcome,
            stored.map(status_cell).unwrap_or_else(|| Cell::new("-")),
            now.map(status_cell).unwrap_or_else(|| Cell::new("-")),
            Cell::new(delta.map(|d| format!("{:+.4}", d)).unwrap_or_default()),
            Cell::new(detail),
        ]);
    }

    right_align(&mut table, 4..=4);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, outcome: AuditOutcome, status: Option<SuspicionStatus>) -> AuditEntry {
        AuditEntry {
            session_id: id.to_string(),
            outcome,
            recomputed: status.map(|status| SessionSuspicionResult {
                status,
                ..Default::default()
            }),
        }
    }

    fn row_cells(rendered: &str, id: &str) -> Vec<String> {
        let line = rendered
            .lines()
            .find(|l| l.contains(id))
            .unwrap_or_else(|| panic!("no row for {}", id));
        line.trim_matches('|')
            .split('|')
            .map(|c| c.trim().to_string())
            .collect()
    }

    #[test]
    fn test_audit_table_stored_column() {
        let entries = vec![
            entry("s-match", AuditOutcome::Match, Some(SuspicionStatus::Amber)),
            entry("s-missing", AuditOutcome::Missing, Some(SuspicionStatus::Red)),
            entry(
                "s-drift",
                AuditOutcome::Drift {
                    stored: SuspicionStatus::Green,
                    recomputed: SuspicionStatus::Red,
                    score_delta: 0.2,
                    summary_changed: false,
                },
                Some(SuspicionStatus::Red),
            ),
            entry(
                "s-failed",
                AuditOutcome::Failed {
                    error: "boom".into(),
                },
                None,
            ),
        ];

        let mut table = audit_table(&entries);
        let rendered = table.force_no_tty().to_string();

        assert_eq!(
            row_cells(&rendered, "s-match")[..5],
            ["s-match", "match", "amber", "amber", ""]
        );
        assert_eq!(
            row_cells(&rendered, "s-missing")[..4],
            ["s-missing", "missing", "-", "red"]
        );
        assert_eq!(
            row_cells(&rendered, "s-drift")[..5],
            ["s-drift", "drift", "green", "red", "+0.2000"]
        );
        assert_eq!(
            row_cells(&rendered, "s-failed")[..4],
            ["s-failed", "failed", "-", "-"]
        );
    }
}
