// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - no model code (Layer 5)
//   - no printing or progress bars (Layer 1)
//   - no direct CSV handling (Layer 4)

// The per-row augmentation loop and its failure policy
pub mod batch_runner;

// Load → augment → save, plus the run configuration
pub mod augment_use_case;
