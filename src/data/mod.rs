// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Moves tables between disk and memory:
//
//   sentences.csv
//       │
//       ▼
//   loader::read_table      → Table (headers + rows, order kept)
//       │
//       ▼
//   (augmentation batch — Layer 2)
//       │
//       ▼
//   writer::write_table     → augmented_sentences.csv
//
// Both directions go through the `csv` crate so quoting, embedded
// newlines and commas inside sentences survive untouched.

/// Reads a CSV file into a Table
pub mod loader;

/// Writes a Table back out as CSV
pub mod writer;
