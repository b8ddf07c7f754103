// ============================================================
// Layer 6 — Model Store
// ============================================================
// Finds the files a Marian translator needs:
//
//   config.json                      — architecture + special token ids
//   model.safetensors | *.bin        — weights, first name that exists
//   tokenizer-marian-base-<src>.json — tokenizer for the input language
//   tokenizer-marian-base-<tgt>.json — tokenizer for the output language
//
// Config and weights come from the model itself. Tokenizers come from a
// separate tokenizer source, since opus-mt repos only ship SentencePiece
// models. Each source is either a local directory or a Hugging Face repo
// id; repo files are fetched into (or read from) the shared hf-hub cache.
// HF_TOKEN is used when set.

use anyhow::{anyhow, bail, Context, Result};
use hf_hub::{
    api::sync::{ApiBuilder, ApiRepo},
    Repo, RepoType,
};
use std::path::{Path, PathBuf};

use crate::application::augment_use_case::{AugmentConfig, TokenizerFiles};

/// Where a model's files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Local(PathBuf),
    Hub { repo_id: String, revision: String },
}

impl ModelSource {
    /// An existing directory is local; anything else is a hub repo id.
    pub fn parse(spec: &str, revision: &str) -> Self {
        let path = Path::new(spec);
        if path.is_dir() {
            ModelSource::Local(path.to_path_buf())
        } else {
            ModelSource::Hub {
                repo_id:  spec.to_string(),
                revision: revision.to_string(),
            }
        }
    }
}

/// File names looked up for one translation direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFileNames {
    pub config:           String,
    /// Candidates, first match wins
    pub weights:          Vec<String>,
    pub source_tokenizer: String,
    pub target_tokenizer: String,
}

impl ModelFileNames {
    pub fn forward(cfg: &AugmentConfig) -> Self {
        Self::with_tokenizers(cfg, &cfg.forward_tokenizers)
    }

    pub fn backward(cfg: &AugmentConfig) -> Self {
        Self::with_tokenizers(cfg, &cfg.backward_tokenizers)
    }

    fn with_tokenizers(cfg: &AugmentConfig, tokenizers: &TokenizerFiles) -> Self {
        Self {
            config:           cfg.config_file.clone(),
            weights:          cfg.weights_files.clone(),
            source_tokenizer: tokenizers.source.clone(),
            target_tokenizer: tokenizers.target.clone(),
        }
    }
}

/// Resolved on-disk paths for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config:           PathBuf,
    pub weights:          PathBuf,
    pub source_tokenizer: PathBuf,
    pub target_tokenizer: PathBuf,
}

pub struct ModelStore {
    names: ModelFileNames,
}

impl ModelStore {
    pub fn new(names: ModelFileNames) -> Self {
        Self { names }
    }

    /// Config and weights from `model`, tokenizers from `tokenizers`.
    pub fn resolve(&self, model: &ModelSource, tokenizers: &ModelSource) -> Result<ModelFiles> {
        let model_files = FileSource::open(model)?;
        let config = model_files.get(&self.names.config)?;
        let weights = model_files.get_first(&self.names.weights)?;

        let tokenizer_files = if tokenizers == model {
            model_files
        } else {
            FileSource::open(tokenizers)?
        };

        Ok(ModelFiles {
            config,
            weights,
            source_tokenizer: tokenizer_files.get(&self.names.source_tokenizer)?,
            target_tokenizer: tokenizer_files.get(&self.names.target_tokenizer)?,
        })
    }
}

enum FileSource {
    Local(PathBuf),
    Hub { repo: ApiRepo, label: String },
}

impl FileSource {
    fn open(source: &ModelSource) -> Result<Self> {
        match source {
            ModelSource::Local(dir) => {
                tracing::debug!("Using local files from '{}'", dir.display());
                Ok(FileSource::Local(dir.clone()))
            }
            ModelSource::Hub { repo_id, revision } => {
                let api = ApiBuilder::new()
                    .with_token(std::env::var("HF_TOKEN").ok())
                    .build()
                    .context("Cannot initialise Hugging Face Hub client")?;

                let repo = api.repo(Repo::with_revision(
                    repo_id.clone(),
                    RepoType::Model,
                    revision.clone(),
                ));

                tracing::info!("Fetching from '{}' (revision {})", repo_id, revision);
                Ok(FileSource::Hub { repo, label: format!("{repo_id}@{revision}") })
            }
        }
    }

    fn get(&self, name: &str) -> Result<PathBuf> {
        match self {
            FileSource::Local(dir) => {
                let path = dir.join(name);
                if !path.is_file() {
                    bail!("Model file '{}' not found in '{}'", name, dir.display());
                }
                Ok(path)
            }
            FileSource::Hub { repo, label } => repo
                .get(name)
                .with_context(|| format!("Cannot fetch '{name}' from '{label}'")),
        }
    }

    fn get_first(&self, names: &[String]) -> Result<PathBuf> {
        let mut last_err = None;
        for name in names {
            match self.get(name) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    tracing::debug!("{e:#}");
                    last_err = Some(e);
                }
            }
        }

        let err = last_err.unwrap_or_else(|| anyhow!("no file names configured"));
        Err(err.context(format!("None of {names:?} could be found")))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"{}").unwrap();
        }
    }

    fn local(dir: &tempfile::TempDir) -> ModelSource {
        ModelSource::Local(dir.path().to_path_buf())
    }

    #[test]
    fn test_existing_directory_is_local() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().display().to_string();
        assert_eq!(
            ModelSource::parse(&spec, "main"),
            ModelSource::Local(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_repo_id_is_hub() {
        assert_eq!(
            ModelSource::parse("Helsinki-NLP/opus-mt-en-de", "refs/pr/1"),
            ModelSource::Hub {
                repo_id:  "Helsinki-NLP/opus-mt-en-de".to_string(),
                revision: "refs/pr/1".to_string(),
            }
        );
    }

    #[test]
    fn test_directions_swap_tokenizers() {
        let cfg = AugmentConfig::default();
        let fwd = ModelFileNames::forward(&cfg);
        let bwd = ModelFileNames::backward(&cfg);

        assert_eq!(fwd.source_tokenizer, "tokenizer-marian-base-en.json");
        assert_eq!(fwd.target_tokenizer, "tokenizer-marian-base-de.json");
        assert_eq!(bwd.source_tokenizer, fwd.target_tokenizer);
        assert_eq!(bwd.target_tokenizer, fwd.source_tokenizer);
        assert_eq!(fwd.weights, bwd.weights);
    }

    #[test]
    fn test_tokenizers_come_from_their_own_source() {
        let model_dir = tempfile::tempdir().unwrap();
        let tok_dir = tempfile::tempdir().unwrap();
        touch(model_dir.path(), &["config.json", "model.safetensors"]);
        touch(tok_dir.path(), &["tokenizer-marian-base-en.json", "tokenizer-marian-base-de.json"]);

        let store = ModelStore::new(ModelFileNames::forward(&AugmentConfig::default()));
        let files = store.resolve(&local(&model_dir), &local(&tok_dir)).unwrap();

        assert_eq!(files.config, model_dir.path().join("config.json"));
        assert_eq!(files.weights, model_dir.path().join("model.safetensors"));
        assert_eq!(files.source_tokenizer, tok_dir.path().join("tokenizer-marian-base-en.json"));
        assert_eq!(files.target_tokenizer, tok_dir.path().join("tokenizer-marian-base-de.json"));
    }

    #[test]
    fn test_weights_fall_back_to_pytorch_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["config.json", "pytorch_model.bin", "tokenizer-marian-base-de.json", "tokenizer-marian-base-en.json"],
        );

        let store = ModelStore::new(ModelFileNames::backward(&AugmentConfig::default()));
        let files = store.resolve(&local(&dir), &local(&dir)).unwrap();
        assert_eq!(files.weights, dir.path().join("pytorch_model.bin"));
    }

    #[test]
    fn test_safetensors_preferred_when_both_exist() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "config.json",
                "model.safetensors",
                "pytorch_model.bin",
                "tokenizer-marian-base-de.json",
                "tokenizer-marian-base-en.json",
            ],
        );

        let store = ModelStore::new(ModelFileNames::forward(&AugmentConfig::default()));
        let files = store.resolve(&local(&dir), &local(&dir)).unwrap();
        assert_eq!(files.weights, dir.path().join("model.safetensors"));
    }

    #[test]
    fn test_missing_weights_lists_every_candidate() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["config.json"]);

        let store = ModelStore::new(ModelFileNames::forward(&AugmentConfig::default()));
        let err = store.resolve(&local(&dir), &local(&dir)).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("model.safetensors"));
        assert!(msg.contains("pytorch_model.bin"));
    }

    #[test]
    fn test_missing_tokenizer_is_reported() {
        let model_dir = tempfile::tempdir().unwrap();
        let tok_dir = tempfile::tempdir().unwrap();
        touch(model_dir.path(), &["config.json", "model.safetensors"]);
        touch(tok_dir.path(), &["tokenizer-marian-base-en.json"]);

        let store = ModelStore::new(ModelFileNames::forward(&AugmentConfig::default()));
        let err = store.resolve(&local(&model_dir), &local(&tok_dir)).unwrap_err();
        assert!(err.to_string().contains("tokenizer-marian-base-de.json"));
    }
}
