// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, renders progress with indicatif and
// prints the final summary. All work is delegated to Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::AugmentArgs;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::augment_use_case::{AugmentConfig, AugmentUseCase};
use crate::application::batch_runner::{BatchObserver, BatchSummary, RowReport};
use crate::domain::augmented::RowOutcome;

#[derive(Parser, Debug)]
#[command(
    name = "backtranslate",
    version,
    about = "Augment a CSV of sentences by back-translation (en → de → en by default)."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: AugmentArgs,
}

impl Cli {
    /// Resolve defaults, config file and flags into one config.
    pub fn into_config(self) -> Result<AugmentConfig> {
        self.args.try_into()
    }
}

/// Run the pipeline and print where the output went.
pub fn run(config: AugmentConfig) -> Result<()> {
    let output_path = config.output_path.clone();
    let use_case = AugmentUseCase::new(config);

    let mut progress = ProgressObserver::new();
    let summary = use_case.execute(&mut progress)?;

    println!(
        "\nAugmented {} rows ({} failed). Saved to {}",
        summary.total, summary.failed, output_path
    );
    Ok(())
}

// ─── Progress rendering ───────────────────────────────────────────────────────
// One bar tick per row. Failed rows are logged with their position and
// error; the bar is suspended while logging so lines don't interleave.
struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new() -> Self {
        Self { bar: ProgressBar::hidden() }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        let style = ProgressStyle::default_bar()
            .template("{spinner} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        self.bar = ProgressBar::new(total as u64);
        self.bar.set_style(style);
    }

    fn on_row(&mut self, report: RowReport<'_>) {
        let position = report.index + 1;
        match report.outcome {
            RowOutcome::Augmented(_) => {
                tracing::debug!("[{}/{}] ok", position, report.total);
            }
            RowOutcome::Failed(err) => {
                self.bar.suspend(|| {
                    tracing::warn!("[{}/{}] Error: {}", position, report.total, err);
                });
            }
        }
        self.bar.inc(1);
    }

    fn on_finish(&mut self, summary: &BatchSummary) {
        self.bar
            .finish_with_message(format!("{} ok, {} failed", summary.succeeded, summary.failed));
    }
}
