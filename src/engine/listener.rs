use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

use crate::syntax::SourceFile;

use super::FindingsByRuleSet;

/// Hooks invoked around each file's analysis, for metrics/progress
/// collaborators.
///
/// Both hooks run inside the file's task and are therefore concurrent with
/// other files' hook invocations; implementations must tolerate concurrent
/// calls if they hold shared state.
pub trait FileProcessListener: Send + Sync {
    fn on_process(&self, _file: &SourceFile) {}

    fn on_process_complete(&self, _file: &SourceFile, _findings: &FindingsByRuleSet) {}
}

/// Progress bar listener for analysis runs.
///
/// The bar is automatically disabled in quiet mode or when stderr is not a
/// TTY, and outputs to stderr to avoid interfering with stdout output.
#[derive(Clone)]
pub struct ProgressListener {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ProgressListener {
    /// Creates a progress listener expecting `total` files.
    ///
    /// # Panics
    /// Panics if the progress bar template is invalid. The template is a
    /// compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar(total)
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_visible_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} Analyzing [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)",
                )
                // SAFETY: Template is a static string with valid format specifiers
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Number of files completed so far.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl FileProcessListener for ProgressListener {
    fn on_process_complete(&self, _file: &SourceFile, _findings: &FindingsByRuleSet) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
