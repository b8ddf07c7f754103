// ============================================================
// Layer 5 — Marian Translator
// ============================================================
// One direction of an opus-mt style Marian encoder–decoder, running on
// candle. Decoding is greedy:
//
//   source ids + </s> ──► encoder ──► encoder states
//                                          │
//   [decoder_start] ──► decoder ──► logits ─┴─► argmax ──► next id
//          ▲                                                 │
//          └──────────── append until </s> or max len ◄──────┘
//
// After the first step only the newest token is fed to the decoder;
// earlier positions live in the model's KV cache, which is cleared
// once the sentence is done.
//
// Reference: Junczys-Dowmunt et al. (2018) Marian
//            candle-transformers `models::marian`

use anyhow::{anyhow, Context, Result};
use candle::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::marian::{Config, MTModel};
use std::{fs, path::Path};
use tokenizers::Tokenizer;

use crate::domain::traits::Translator;
use crate::infra::model_store::ModelFiles;

// Greedy decoding ignores the seed; LogitsProcessor still wants one.
const SAMPLING_SEED: u64 = 299792458;

// ─── Decoder ──────────────────────────────────────────────────────────────────
// Token ids in, token ids out. Owns the model and its KV cache.
pub struct MarianDecoder {
    model:          MTModel,
    config:         Config,
    logits:         LogitsProcessor,
    device:         Device,
    max_decode_len: usize,
}

impl MarianDecoder {
    pub fn new(model: MTModel, config: Config, device: &Device, max_decode_len: usize) -> Self {
        Self {
            model,
            config,
            logits: LogitsProcessor::new(SAMPLING_SEED, None, None),
            device: device.clone(),
            max_decode_len,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one id sequence. The KV cache is empty afterwards,
    /// whether decoding succeeded or not.
    pub fn decode_sentence(&mut self, source_ids: &[u32]) -> Result<Vec<u32>> {
        let generated = self.generate(source_ids);
        self.model.reset_kv_cache();
        generated
    }

    /// Greedy decode. Returned ids exclude the start token and </s>.
    /// Leaves the KV cache filled.
    fn generate(&mut self, source_ids: &[u32]) -> Result<Vec<u32>> {
        let input = Tensor::new(source_ids, &self.device)?.unsqueeze(0)?;
        let encoder_xs = self.model.encoder().forward(&input, 0)?;

        let mut tokens = vec![self.config.decoder_start_token_id];

        for step in 0..self.max_decode_len {
            let context = if step == 0 { tokens.len() } else { 1 };
            let start = tokens.len() - context;

            let input = Tensor::new(&tokens[start..], &self.device)?.unsqueeze(0)?;
            let logits = self.model.decode(&input, &encoder_xs, start)?;
            let logits = logits.squeeze(0)?;
            let logits = logits.get(logits.dim(0)? - 1)?;

            let next = self.logits.sample(&logits)?;
            if next == self.config.eos_token_id || next == self.config.forced_eos_token_id {
                break;
            }
            tokens.push(next);
        }

        Ok(tokens.split_off(1))
    }
}

// ─── Translator ───────────────────────────────────────────────────────────────
pub struct MarianTranslator {
    /// Model name used in log and error messages
    name:             String,
    decoder:          MarianDecoder,
    source_tokenizer: Tokenizer,
    target_tokenizer: Tokenizer,
}

impl MarianTranslator {
    /// Load config, tokenizers and weights onto `device`.
    pub fn load(
        name:           impl Into<String>,
        files:          &ModelFiles,
        device:         &Device,
        max_decode_len: usize,
    ) -> Result<Self> {
        let name = name.into();

        let config_json = fs::read_to_string(&files.config)
            .with_context(|| format!("Cannot read model config '{}'", files.config.display()))?;
        let config: Config = serde_json::from_str(&config_json)
            .with_context(|| format!("Invalid Marian config '{}'", files.config.display()))?;

        let source_tokenizer = load_tokenizer(&files.source_tokenizer)?;
        let target_tokenizer = load_tokenizer(&files.target_tokenizer)?;

        let vb = load_weights(&files.weights, device)?;
        let model = MTModel::new(&config, vb)
            .with_context(|| format!("Cannot build Marian model '{name}'"))?;

        tracing::debug!(
            "Loaded '{}' (d_model={}, encoder_layers={}, decoder_layers={})",
            name,
            config.d_model,
            config.encoder_layers,
            config.decoder_layers
        );

        Ok(Self {
            name,
            decoder: MarianDecoder::new(model, config, device, max_decode_len),
            source_tokenizer,
            target_tokenizer,
        })
    }
}

impl Translator for MarianTranslator {
    fn translate(&mut self, text: &str) -> Result<String> {
        let eos = self.decoder.config().eos_token_id;
        let pad = self.decoder.config().pad_token_id;

        let source_ids = encode_source(&self.source_tokenizer, text, eos)
            .with_context(|| format!("Tokenisation error in '{}'", self.name))?;

        let generated = self.decoder.decode_sentence(&source_ids)?;

        decode_target(&self.target_tokenizer, &generated, pad)
            .with_context(|| format!("Decode error in '{}'", self.name))
    }
}

/// Tokenise `text` and make sure it ends with `eos`.
fn encode_source(tokenizer: &Tokenizer, text: &str, eos: u32) -> Result<Vec<u32>> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("{e}"))?;

    let mut ids = enc.get_ids().to_vec();
    if ids.last() != Some(&eos) {
        ids.push(eos);
    }
    Ok(ids)
}

/// Drop padding, detokenise, trim.
fn decode_target(tokenizer: &Tokenizer, ids: &[u32], pad: u32) -> Result<String> {
    let ids: Vec<u32> = ids.iter().copied().filter(|&id| id != pad).collect();
    let text = tokenizer.decode(&ids, true).map_err(|e| anyhow!("{e}"))?;
    Ok(text.trim().to_string())
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path)
        .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
}

/// `.bin` / `.pth` / `.pt` are PyTorch checkpoints; everything else is safetensors.
fn load_weights(path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let is_pytorch = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("bin" | "pth" | "pt")
    );

    if is_pytorch {
        return VarBuilder::from_pth(path, DType::F32, device)
            .with_context(|| format!("Cannot read weights '{}'", path.display()));
    }

    // SAFETY: the weights file is memory-mapped read-only and must not be
    // modified while the model is alive.
    unsafe {
        VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)
            .with_context(|| format!("Cannot map weights '{}'", path.display()))
    }
}
