// ============================================================
// Layer 5 — Back-Translation Augmenter
// ============================================================
// Paraphrases a sentence by a round trip through a pivot language:
//
//   "The weather is nice today."
//        │ forward  (en → de)
//        ▼
//   "Das Wetter ist heute schön."
//        │ backward (de → en)
//        ▼
//   "The weather is beautiful today."
//
// Blank input, or a blank result at either hop, is an error so the
// batch runner records the row as failed instead of writing noise.

use anyhow::{bail, Context, Result};

use crate::application::augment_use_case::AugmentConfig;
use crate::domain::{
    augmented::Augmented,
    traits::{Augmenter, Translator},
};
use crate::infra::{
    device::{device_label, select_device},
    model_store::{ModelFileNames, ModelSource, ModelStore},
};
use crate::ml::translator::MarianTranslator;

pub struct BackTranslationAugmenter<F, B> {
    /// source → pivot
    forward: F,

    /// pivot → source
    backward: B,
}

impl<F: Translator, B: Translator> BackTranslationAugmenter<F, B> {
    pub fn new(forward: F, backward: B) -> Self {
        Self { forward, backward }
    }
}

impl BackTranslationAugmenter<MarianTranslator, MarianTranslator> {
    /// Resolve both Marian models and load them onto the selected device.
    pub fn from_config(cfg: &AugmentConfig) -> Result<Self> {
        let device = select_device(cfg.force_cpu)?;
        tracing::info!("Using device: {}", device_label(&device));

        let load = |model: &str, names: ModelFileNames| -> Result<MarianTranslator> {
            let source = ModelSource::parse(model, &cfg.revision);
            let tokenizers = if cfg.tokenizer_repo.is_empty() {
                source.clone()
            } else {
                ModelSource::parse(&cfg.tokenizer_repo, &cfg.tokenizer_revision)
            };

            let files = ModelStore::new(names)
                .resolve(&source, &tokenizers)
                .with_context(|| format!("Cannot resolve model '{model}'"))?;
            MarianTranslator::load(model, &files, &device, cfg.max_decode_len)
        };

        let forward = load(&cfg.forward_model, ModelFileNames::forward(cfg))?;
        let backward = load(&cfg.backward_model, ModelFileNames::backward(cfg))?;

        Ok(Self::new(forward, backward))
    }
}

impl<F: Translator, B: Translator> Augmenter for BackTranslationAugmenter<F, B> {
    fn augment(&mut self, text: &str) -> Result<Augmented> {
        if text.trim().is_empty() {
            bail!("input sentence is empty");
        }

        let pivot = self
            .forward
            .translate(text)
            .context("forward translation failed")?;
        if pivot.trim().is_empty() {
            bail!("forward translation produced no text");
        }

        let back = self
            .backward
            .translate(&pivot)
            .context("backward translation failed")?;
        if back.trim().is_empty() {
            bail!("backward translation produced no text");
        }

        Ok(Augmented::Single(back.trim().to_string()))
    }
}
