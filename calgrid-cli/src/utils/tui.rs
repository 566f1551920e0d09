//! Terminal progress while the store is busy.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// A stderr spinner, hidden when stderr is not a terminal.
fn store_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(TICK);
    spinner
}

/// Await `work` behind a spinner that is cleared when it finishes.
pub async fn with_spinner<F: Future>(message: impl Into<String>, work: F) -> F::Output {
    let spinner = store_spinner(message.into());
    let output = work.await;
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spinner_passes_the_result_through() {
        let loaded = with_spinner("Loading 2024-03", async { vec![1, 2, 3] }).await;
        assert_eq!(loaded, vec![1, 2, 3]);
    }
}
