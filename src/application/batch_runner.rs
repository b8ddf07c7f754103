// ============================================================
// Layer 2 — Augmentation Batch Runner
// ============================================================
// Order-preserving map-with-fallback over a list of sentences:
//
//   for each sentence, in order:
//       augment once
//       ok   → keep the (first) result
//       err  → keep ""   and carry on
//
// Rows are independent. The output always has exactly one entry per
// input, at the same index. There is no retry; a row gets one attempt.
//
// Progress goes to a BatchObserver so this module never prints.

use std::time::{Duration, Instant};

use crate::domain::augmented::{Augmented, RowOutcome};
use crate::domain::traits::Augmenter;

/// Progress event for a single finished row.
#[derive(Debug, Clone, Copy)]
pub struct RowReport<'a> {
    /// 0-based row index
    pub index: usize,

    /// Number of rows in the batch
    pub total: usize,

    pub outcome: &'a RowOutcome,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Receives progress from `run_batch`. Every method defaults to a no-op.
pub trait BatchObserver {
    fn on_start(&mut self, _total: usize) {}
    fn on_row(&mut self, _report: RowReport<'_>) {}
    fn on_finish(&mut self, _summary: &BatchSummary) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// One attempt at one row. Never fails: errors become `RowOutcome::Failed`.
pub fn augment_row<A: Augmenter + ?Sized>(augmenter: &mut A, text: &str) -> RowOutcome {
    match augmenter.augment(text).and_then(Augmented::into_first) {
        Ok(value) => RowOutcome::Augmented(value),
        Err(e) => RowOutcome::Failed(format!("{e:#}")),
    }
}

/// Augment every input in order and return the aligned outputs.
pub fn run_batch<A, O>(
    augmenter: &mut A,
    inputs: &[String],
    observer: &mut O,
) -> (Vec<String>, BatchSummary)
where
    A: Augmenter + ?Sized,
    O: BatchObserver + ?Sized,
{
    let started = Instant::now();
    let total = inputs.len();
    observer.on_start(total);

    let mut outputs = Vec::with_capacity(total);
    let mut succeeded = 0usize;

    for (index, text) in inputs.iter().enumerate() {
        let outcome = augment_row(augmenter, text);
        if outcome.is_success() {
            succeeded += 1;
        }

        observer.on_row(RowReport {
            index,
            total,
            outcome: &outcome,
        });
        outputs.push(outcome.into_value());
    }

    let summary = BatchSummary {
        total,
        succeeded,
        failed: total - succeeded,
        elapsed: started.elapsed(),
    };
    observer.on_finish(&summary);

    (outputs, summary)
}

/// `run_batch` without progress reporting.
pub fn augment_all<A: Augmenter + ?Sized>(augmenter: &mut A, inputs: &[String]) -> Vec<String> {
    run_batch(augmenter, inputs, &mut NoopObserver).0
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use std::collections::HashMap;

    /// Scripted augmenter: fixed answers per input, error for anything else.
    struct Scripted {
        answers: HashMap<String, Augmented>,
        calls: Vec<String>,
    }

    impl Scripted {
        fn new(pairs: &[(&str, Augmented)]) -> Self {
            Self {
                answers: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                calls: Vec::new(),
            }
        }
    }

    impl Augmenter for Scripted {
        fn augment(&mut self, text: &str) -> Result<Augmented> {
            self.calls.push(text.to_string());
            match self.answers.get(text) {
                Some(a) => Ok(a.clone()),
                None => bail!("no translation for '{text}'"),
            }
        }
    }

    /// Succeeds on every other call, echoing the input reversed.
    struct Alternating {
        calls: usize,
    }

    impl Augmenter for Alternating {
        fn augment(&mut self, text: &str) -> Result<Augmented> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                bail!("transient failure");
            }
            Ok(Augmented::Single(text.chars().rev().collect()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        started: Option<usize>,
        rows: Vec<(usize, usize, bool)>,
        finished: Option<BatchSummary>,
    }

    impl BatchObserver for Recorder {
        fn on_start(&mut self, total: usize) {
            self.started = Some(total);
        }
        fn on_row(&mut self, r: RowReport<'_>) {
            self.rows.push((r.index, r.total, r.outcome.is_success()));
        }
        fn on_finish(&mut self, s: &BatchSummary) {
            self.finished = Some(*s);
        }
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_success_and_failure_rows() {
        let mut aug = Scripted::new(&[("hello world", Augmented::Single("hello world again".to_string()))]);
        let out = augment_all(&mut aug, &strings(&["hello world", "foo"]));
        assert_eq!(out, vec!["hello world again", ""]);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let mut aug = Scripted::new(&[]);
        let (out, summary) = run_batch(&mut aug, &[], &mut NoopObserver);
        assert!(out.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.failed, 0);
        assert!(aug.calls.is_empty());
    }

    #[test]
    fn test_candidates_keep_first() {
        let mut aug = Scripted::new(&[("x", Augmented::Candidates(strings(&["a", "b"])))]);
        assert_eq!(augment_all(&mut aug, &strings(&["x"])), vec!["a"]);
    }

    #[test]
    fn test_empty_candidate_list_is_a_failed_row() {
        let mut aug = Scripted::new(&[("x", Augmented::Candidates(Vec::new()))]);
        let (out, summary) = run_batch(&mut aug, &strings(&["x"]), &mut NoopObserver);
        assert_eq!(out, vec![""]);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_length_and_order_preserved() {
        let inputs: Vec<String> = (0..25).map(|i| format!("sentence {i}")).collect();
        let mut aug = Alternating { calls: 0 };
        let out = augment_all(&mut aug, &inputs);

        assert_eq!(out.len(), inputs.len());
        for (i, (input, output)) in inputs.iter().zip(&out).enumerate() {
            if i % 2 == 0 {
                let expected: String = input.chars().rev().collect();
                assert_eq!(output, &expected, "row {i} misaligned");
            } else {
                assert_eq!(output, "", "row {i} should have failed");
            }
        }
    }

    #[test]
    fn test_repeated_failures_never_reuse_previous_value() {
        let mut aug = Scripted::new(&[("ok", Augmented::Single("fine".to_string()))]);
        let out = augment_all(&mut aug, &strings(&["ok", "bad", "bad", "ok", "bad"]));
        assert_eq!(out, vec!["fine", "", "", "fine", ""]);
    }

    #[test]
    fn test_each_row_is_attempted_exactly_once_in_order() {
        let mut aug = Scripted::new(&[]);
        augment_all(&mut aug, &strings(&["a", "b", "c"]));
        assert_eq!(aug.calls, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_observer_sees_every_row() {
        let mut aug = Scripted::new(&[("a", Augmented::Single("A".to_string()))]);
        let mut rec = Recorder::default();
        let (_, summary) = run_batch(&mut aug, &strings(&["a", "b", "a"]), &mut rec);

        assert_eq!(rec.started, Some(3));
        assert_eq!(rec.rows, vec![(0, 3, true), (1, 3, false), (2, 3, true)]);
        assert_eq!(rec.finished, Some(summary));
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded + summary.failed, summary.total);
    }

    #[test]
    fn test_failed_outcome_keeps_error_message() {
        let mut aug = Scripted::new(&[]);
        match augment_row(&mut aug, "zzz") {
            RowOutcome::Failed(msg) => assert!(msg.contains("zzz")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut aug: Box<dyn Augmenter> =
            Box::new(Scripted::new(&[("a", Augmented::Single("b".to_string()))]));
        assert_eq!(augment_all(&mut aug, &strings(&["a"])), vec!["b"]);
    }
}
