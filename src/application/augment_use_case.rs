// ============================================================
// Layer 2 — AugmentUseCase
// ============================================================
// Orchestrates one augmentation run:
//
//   Step 1: Load the input table          (Layer 4 - data)
//   Step 2: Check the text column exists  (Layer 3 - domain)
//   Step 3: Build the augmenter           (Layer 5 - ml)
//   Step 4: Run the batch                 (Layer 2 - batch_runner)
//   Step 5: Attach the output column      (Layer 3 - domain)
//   Step 6: Write the output table        (Layer 4 - data)
//
// Steps 1–2 happen before any model is loaded, so a bad input path or a
// missing column fails fast. Anything that fails in steps 1–3 or 6 ends
// the run; failures inside step 4 only affect their own row.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::batch_runner::{run_batch, BatchObserver, BatchSummary};
use crate::data::{loader::read_table, writer::write_table};
use crate::domain::{table::Table, traits::Augmenter};
use crate::ml::back_translation::BackTranslationAugmenter;

// ─── Augmentation Configuration ───────────────────────────────────────────────
// Every knob for a run. Serialisable so a run can be described in a JSON
// file and passed with --config. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub input_path:  String,
    pub output_path: String,

    /// Column holding the sentences to augment
    pub text_column: String,

    /// Column the augmented sentences are written to
    pub output_column: String,

    /// Source → pivot model (local directory or Hugging Face repo id)
    pub forward_model: String,

    /// Pivot → source model (local directory or Hugging Face repo id)
    pub backward_model: String,

    /// Hub revision used for both models
    pub revision: String,

    /// Where tokenizer JSON files come from (local directory or hub repo id).
    /// Empty means each model's own directory or repo.
    pub tokenizer_repo:     String,
    pub tokenizer_revision: String,

    /// Maximum number of generated tokens per sentence
    pub max_decode_len: usize,

    pub force_cpu: bool,
    pub log_file:  String,

    pub config_file: String,

    /// Weight file names, tried in order. `.bin` / `.pth` files are read as
    /// PyTorch checkpoints, anything else as safetensors.
    pub weights_files: Vec<String>,

    pub forward_tokenizers:  TokenizerFiles,
    pub backward_tokenizers: TokenizerFiles,
}

/// Tokenizer file names for one translation direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerFiles {
    pub source: String,
    pub target: String,
}

impl TokenizerFiles {
    fn marian_base(source: &str, target: &str) -> Self {
        Self {
            source: format!("tokenizer-marian-base-{source}.json"),
            target: format!("tokenizer-marian-base-{target}.json"),
        }
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            input_path:            "Data/Raw_X/sentences.csv".to_string(),
            output_path:           "Data/Processed_X/augmented_sentences.csv".to_string(),
            text_column:           "text".to_string(),
            output_column:         "augmented_sentence".to_string(),
            forward_model:         "Helsinki-NLP/opus-mt-en-de".to_string(),
            backward_model:        "Helsinki-NLP/opus-mt-de-en".to_string(),
            revision:              "main".to_string(),
            tokenizer_repo:        "lmz/candle-marian".to_string(),
            tokenizer_revision:    "main".to_string(),
            max_decode_len:        512,
            force_cpu:             false,
            log_file:              "augmentation.log".to_string(),
            config_file:           "config.json".to_string(),
            weights_files:         vec![
                "model.safetensors".to_string(),
                "pytorch_model.bin".to_string(),
            ],
            forward_tokenizers:    TokenizerFiles::marian_base("en", "de"),
            backward_tokenizers:   TokenizerFiles::marian_base("de", "en"),
        }
    }
}

impl AugmentConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }
}

// ─── AugmentUseCase ───────────────────────────────────────────────────────────
pub struct AugmentUseCase {
    config: AugmentConfig,
}

impl AugmentUseCase {
    pub fn new(config: AugmentConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline with the Marian back-translation augmenter.
    pub fn execute<O: BatchObserver + ?Sized>(&self, observer: &mut O) -> Result<BatchSummary> {
        let cfg = &self.config;
        tracing::info!("Starting data augmentation pipeline.");

        // ── Steps 1–2: Load and validate input ────────────────────────────────
        let table = self.load_input()?;

        // ── Step 3: Build the augmenter ───────────────────────────────────────
        let mut augmenter = BackTranslationAugmenter::from_config(cfg)?;
        tracing::info!(
            "BackTranslation augmenter initialized ({} -> {})",
            cfg.forward_model,
            cfg.backward_model
        );

        // ── Steps 4–6 ─────────────────────────────────────────────────────────
        let summary = self.augment_and_save(table, &mut augmenter, observer)?;

        tracing::info!("Pipeline complete.");
        Ok(summary)
    }

    /// Read the input CSV and make sure the text column is there.
    pub fn load_input(&self) -> Result<Table> {
        let cfg = &self.config;

        let table = read_table(&cfg.input_path)?;
        if table.column(&cfg.text_column).is_none() {
            anyhow::bail!(
                "Input '{}' has no '{}' column (columns: {:?})",
                cfg.input_path,
                cfg.text_column,
                table.headers
            );
        }

        tracing::info!("Loaded data: {} rows from '{}'", table.len(), cfg.input_path);
        Ok(table)
    }

    /// Augment the text column of `table` and write the result.
    pub fn augment_and_save<A, O>(
        &self,
        mut table: Table,
        augmenter: &mut A,
        observer: &mut O,
    ) -> Result<BatchSummary>
    where
        A: Augmenter + ?Sized,
        O: BatchObserver + ?Sized,
    {
        let cfg = &self.config;

        let sentences = table.column_values(&cfg.text_column)?;
        let (augmented, summary) = run_batch(augmenter, &sentences, observer);

        tracing::info!(
            "Augmented {} rows: {} succeeded, {} failed ({:.1}s)",
            summary.total,
            summary.succeeded,
            summary.failed,
            summary.elapsed.as_secs_f64()
        );

        table.set_column(&cfg.output_column, augmented)?;
        write_table(&cfg.output_path, &table)?;

        tracing::info!("Saved to {}", cfg.output_path);
        Ok(summary)
    }
}
