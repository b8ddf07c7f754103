// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The batch runner only ever sees an `Augmenter`. The back-translation
// augmenter in turn only sees two `Translator`s. Both seams exist so the
// model-backed implementations can be swapped for test doubles.
//
// Implementations:
//   - BackTranslationAugmenter → Augmenter  (ml/back_translation.rs)
//   - MarianTranslator         → Translator (ml/translator.rs)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::augmented::Augmented;

// ─── Augmenter ────────────────────────────────────────────────────────────────
/// Any component that turns one sentence into an augmented variant.
///
/// Takes `&mut self` because model-backed implementations keep decoder
/// caches between calls. Each call is still independent of the previous row.
pub trait Augmenter {
    /// Produce an augmented version of `text`.
    /// An `Err` marks this row as failed; it never aborts the batch.
    fn augment(&mut self, text: &str) -> Result<Augmented>;
}

impl<A: Augmenter + ?Sized> Augmenter for Box<A> {
    fn augment(&mut self, text: &str) -> Result<Augmented> {
        (**self).augment(text)
    }
}

// ─── Translator ───────────────────────────────────────────────────────────────
/// One direction of a translation model pair.
pub trait Translator {
    /// Translate `text` into this translator's target language.
    fn translate(&mut self, text: &str) -> Result<String>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&mut self, text: &str) -> Result<String> {
        (**self).translate(text)
    }
}
