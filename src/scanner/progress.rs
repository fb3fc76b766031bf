//! Progress reporting abstraction
//!
//! Decouples the directory walk from UI concerns (indicatif).

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A handle to an active progress display
pub trait ProgressHandle: Send + Sync {
    /// Called after each recorded entry with the running totals
    fn update(&self, files: u64, dirs: u64);
    fn finish(&self);
}

/// Factory for creating progress handles
pub trait ProgressReporter: Send + Sync {
    fn start(&self, label: &str) -> Box<dyn ProgressHandle>;
}

/// Indicatif spinner on stderr for CLI usage
pub struct IndicatifProgress;

impl ProgressReporter for IndicatifProgress {
    fn start(&self, label: &str) -> Box<dyn ProgressHandle> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(&format!("{{spinner:.green}} {}... {{msg}} ({{elapsed}})", label))
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Box::new(IndicatifHandle(pb))
    }
}

struct IndicatifHandle(ProgressBar);

impl ProgressHandle for IndicatifHandle {
    fn update(&self, files: u64, dirs: u64) {
        self.0
            .set_message(format!("{} files, {} directories", files, dirs));
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// No-op progress reporter for tests, benchmarks and quiet mode
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _label: &str) -> Box<dyn ProgressHandle> {
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl ProgressHandle for NoopHandle {
    fn update(&self, _files: u64, _dirs: u64) {}
    fn finish(&self) {}
}

/// Progress reporter that only shows output when verbose
pub struct VerboseProgress {
    verbose: bool,
}

impl VerboseProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for VerboseProgress {
    fn start(&self, label: &str) -> Box<dyn ProgressHandle> {
        if self.verbose {
            IndicatifProgress.start(label)
        } else {
            NoopProgress.start(label)
        }
    }
}
