//! Progress display for batches of images and video frames

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks completion of a fixed number of work items
///
/// The bar is safe to advance from worker threads.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Visible progress bar for `total` items labelled with `label`
    pub fn new(total: usize, label: &str) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// Progress tracker that draws nothing
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar }
    }

    /// Show which item is being worked on
    pub fn start_item(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
    }

    /// Mark one item as finished
    pub fn complete_item(&self) {
        self.bar.inc(1);
    }

    /// Number of items finished so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the display once all items are done
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
