// ============================================================================
// spoofer-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: per-variant export progress
//
// Renders the core's ExportProgress callbacks as an indicatif bar when
// stderr is a terminal, and as plain log lines otherwise so piped output
// and log files stay readable.

// ---- External crate imports ----
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use spoofer_core::ExportProgress;

// ---- Standard library imports ----
use std::time::Duration;

/// Progress display for one export run.
pub struct ExportProgressBar {
    bar: Option<ProgressBar>,
}

impl ExportProgressBar {
    /// Creates a bar for `total` exports; `interactive` selects the bar over
    /// log lines.
    pub fn new(total: usize, interactive: bool) -> Self {
        let bar = interactive.then(|| {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ ");
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        Self { bar }
    }

    /// Whether stderr is attached to a terminal.
    pub fn stderr_is_terminal() -> bool {
        console::Term::stderr().is_term()
    }

    /// Records one completed export.
    pub fn update(&self, progress: &ExportProgress<'_>) {
        match &self.bar {
            Some(bar) => {
                bar.set_position(progress.current as u64);
                bar.set_message(progress.archive_path.to_string());
            }
            None => info!(
                "[{}/{}] {} ({:.0}%)",
                progress.current,
                progress.total,
                progress.archive_path,
                progress.fraction() * 100.0
            ),
        }
    }

    /// Removes the bar from the terminal.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ExportProgressBar {
    fn drop(&mut self) {
        self.finish();
    }
}
