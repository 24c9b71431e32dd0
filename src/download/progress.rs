//! Byte progress bar for a single download.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::constants::PROGRESS_LABEL_CHARS;

/// Creates the bar for one download.
///
/// With a declared length the bar shows bytes against the total; without one
/// it falls back to an indeterminate spinner with a byte counter. When
/// `enabled` is false the bar is hidden but still counts.
pub(crate) fn download_bar(enabled: bool, total: Option<u64>, label: &str) -> ProgressBar {
    let bar = match (enabled, total) {
        (false, total) => ProgressBar::with_draw_target(total, ProgressDrawTarget::hidden()),
        (true, Some(total)) => ProgressBar::new(total).with_style(
            ProgressStyle::with_template(
                "{msg:30} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        ),
        (true, None) => {
            let spinner = ProgressBar::new_spinner().with_style(
                ProgressStyle::with_template("{spinner} {msg:30} {bytes} ({bytes_per_sec})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        }
    };
    bar.set_message(progress_label(label));
    bar
}

fn progress_label(label: &str) -> String {
    label.chars().take(PROGRESS_LABEL_CHARS).collect()
}
