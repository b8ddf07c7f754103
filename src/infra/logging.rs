// ============================================================
// Layer 6 — Logging Setup
// ============================================================
// Two tracing outputs:
//
//   stderr        — filtered by RUST_LOG, defaults to backtranslate=info
//   log file      — same events, plain text (no ANSI colours), appended
//                   across runs; skipped when the path is empty
//
// Example file line:
//   2026-10-18T09:12:44.118Z  INFO Starting data augmentation pipeline.

use anyhow::{Context, Result};
use std::{fs, fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "backtranslate=info";

/// Filter from a RUST_LOG value. Unset, blank or unparsable values fall
/// back to the default.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging(log_file: &str) -> Result<()> {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    let console = fmt::layer().with_writer(std::io::stderr);

    let file_layer = if log_file.is_empty() {
        None
    } else {
        let path = Path::new(log_file);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create log directory '{}'", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file '{}'", path.display()))?;

        Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Cannot install tracing subscriber")?;

    Ok(())
}
