// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag is optional. Resolution order for each setting:
//
//   built-in default  <  --config JSON file  <  explicit flag
//
// so running the binary with no arguments reproduces the standard
// Raw_X → Processed_X run with the en↔de opus-mt pair.

use anyhow::Result;
use clap::Args;

use crate::application::augment_use_case::AugmentConfig;

#[derive(Args, Debug, Default)]
pub struct AugmentArgs {
    /// JSON file with any subset of the run configuration
    #[arg(long)]
    pub config: Option<String>,

    /// CSV file with a `text` column. Relative paths, including the default
    /// Data/Raw_X/sentences.csv, resolve against the current working directory
    #[arg(long)]
    pub input: Option<String>,

    /// Where the augmented CSV is written (parent dirs are created). Relative
    /// paths, including the default Data/Processed_X/augmented_sentences.csv,
    /// resolve against the current working directory
    #[arg(long)]
    pub output: Option<String>,

    /// Name of the column holding the sentences
    #[arg(long)]
    pub text_column: Option<String>,

    /// Name of the column to write augmented sentences into
    #[arg(long)]
    pub output_column: Option<String>,

    /// Source → pivot model: local directory or Hugging Face repo id
    #[arg(long)]
    pub forward_model: Option<String>,

    /// Pivot → source model: local directory or Hugging Face repo id
    #[arg(long)]
    pub backward_model: Option<String>,

    /// Hub revision (branch, tag, or refs/pr/N) for both models
    #[arg(long)]
    pub revision: Option<String>,

    /// Tokenizer JSON source: local directory or Hugging Face repo id.
    /// Pass an empty string to read tokenizers from the model itself
    #[arg(long)]
    pub tokenizer_repo: Option<String>,

    /// Maximum tokens generated per translation
    #[arg(long)]
    pub max_decode_len: Option<usize>,

    /// Run on CPU even if a CUDA device is available
    #[arg(long)]
    pub cpu: bool,

    /// Log file path; pass an empty string to disable file logging
    #[arg(long)]
    pub log_file: Option<String>,
}

/// CLI args → application config. The application layer never sees
/// clap types.
impl TryFrom<AugmentArgs> for AugmentConfig {
    type Error = anyhow::Error;

    fn try_from(a: AugmentArgs) -> Result<Self> {
        let mut cfg = match &a.config {
            Some(path) => AugmentConfig::load(path)?,
            None => AugmentConfig::default(),
        };

        if let Some(v) = a.input          { cfg.input_path = v; }
        if let Some(v) = a.output         { cfg.output_path = v; }
        if let Some(v) = a.text_column    { cfg.text_column = v; }
        if let Some(v) = a.output_column  { cfg.output_column = v; }
        if let Some(v) = a.forward_model  { cfg.forward_model = v; }
        if let Some(v) = a.backward_model { cfg.backward_model = v; }
        if let Some(v) = a.revision       { cfg.revision = v; }
        if let Some(v) = a.tokenizer_repo { cfg.tokenizer_repo = v; }
        if let Some(v) = a.max_decode_len { cfg.max_decode_len = v; }
        if let Some(v) = a.log_file       { cfg.log_file = v; }
        if a.cpu                          { cfg.force_cpu = true; }

        Ok(cfg)
    }
}
