// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the augmentation
// pipeline works on. Nothing in here touches the filesystem, candle,
// or the network, so every type can be built directly in tests.
//
//   table.rs     — an in-memory CSV table (headers + ordered rows)
//   augmented.rs — what an augmenter returns, and what a row ends up as
//   traits.rs    — Augmenter / Translator seams
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// In-memory table of string cells
pub mod table;

/// Augmenter results and per-row outcomes
pub mod augmented;

/// Core abstractions that the ML layer implements
pub mod traits;
