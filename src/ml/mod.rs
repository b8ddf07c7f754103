// ============================================================
// Layer 5 — ML / Model Layer (candle)
// ============================================================
// The only layer that imports candle. Everything above it talks to
// the `Augmenter` and `Translator` traits from the domain layer.
//
//   translator.rs       — MarianTranslator: one opus-mt model,
//                         greedy decoding on CPU or CUDA
//
//   back_translation.rs — BackTranslationAugmenter: forward model
//                         into the pivot language, backward model
//                         out of it

/// Single-direction Marian MT model
pub mod translator;

/// Round-trip augmenter built from two translators
pub mod back_translation;
