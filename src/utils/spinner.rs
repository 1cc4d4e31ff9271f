use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::time::Duration;

/// Stderr spinner shown while a source is being fetched. Hidden when stderr
/// is not a terminal.
pub struct Spinner {
    bar: ProgressBar,
    active: Cell<bool>,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));

        Spinner {
            bar,
            active: Cell::new(true),
        }
    }

    pub fn finish_and_clear(&self) {
        if self.active.get() {
            self.bar.finish_and_clear();
            self.active.set(false);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.active.get() {
            self.bar.abandon();
            self.active.set(false);
        }
    }
}

/// Runs `action` under a spinner, clearing it whatever the outcome.
pub fn with_spinner<T, E, F>(message: &str, action: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let spinner = Spinner::new(message);
    let result = action();
    spinner.finish_and_clear();
    result
}
