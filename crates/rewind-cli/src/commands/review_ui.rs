use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

/// Progress display for the lookup stage.
///
/// Draws a bar on an interactive terminal; otherwise stays hidden and leaves
/// progress reporting to structured logs.
pub struct ReviewUI {
    bar: ProgressBar,
    interactive: bool,
}

impl ReviewUI {
    pub fn new(total: usize, quiet: bool) -> Self {
        let interactive = is_interactive() && !quiet;

        let bar = if interactive {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            bar.set_message("Looking up titles...");
            bar
        } else {
            tracing::info!(
                operation = "ui_init",
                mode = "non_interactive",
                "Running in non-interactive mode - progress bar disabled, using structured logging"
            );
            ProgressBar::hidden()
        };

        Self { bar, interactive }
    }

    pub fn set_position(&self, processed: usize) {
        if self.interactive {
            self.bar.set_position(processed as u64);
        }
    }

    pub fn finish(&self) {
        if self.interactive {
            self.bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
