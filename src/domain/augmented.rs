// ============================================================
// Layer 3 — Augmentation Results
// ============================================================
// An augmenter may hand back either one string or a short ranked list
// of candidates. The runner keeps only the first candidate.
//
// Each row then settles into exactly one RowOutcome. A failed row is
// written out as the empty string; the error text is only kept for
// progress reporting and logs.

use anyhow::{anyhow, Result};

/// Raw value returned by an augmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmented {
    /// A single augmented sentence
    Single(String),

    /// Ranked candidates, best first
    Candidates(Vec<String>),
}

impl Augmented {
    /// Collapse to the accepted value.
    /// An empty candidate list has nothing to accept and counts as an error.
    pub fn into_first(self) -> Result<String> {
        match self {
            Augmented::Single(s) => Ok(s),
            Augmented::Candidates(list) => list
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("augmenter returned no candidates")),
        }
    }
}

/// Final state of one row after a single augmentation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The accepted augmented sentence
    Augmented(String),

    /// The augmenter failed; holds the error message
    Failed(String),
}

impl RowOutcome {
    /// The value written to the output column.
    /// Failed rows always yield "" regardless of the error.
    pub fn into_value(self) -> String {
        match self {
            RowOutcome::Augmented(s) => s,
            RowOutcome::Failed(_) => String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Augmented(_))
    }
}
