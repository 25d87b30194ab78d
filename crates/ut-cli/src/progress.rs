use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// A single step of a multi-step command.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        let prefs = ui::prefs();
        if !prefs.spinners {
            if prefs.steps {
                eprintln!("* {message} ...");
            }
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Announce `step` without animating; ssh and pinentry may take over the
/// terminal.
pub fn interactive_step<T, E>(message: &str, step: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let prefs = ui::prefs();
    if prefs.spinners || prefs.steps {
        eprintln!("* {message} ...");
    }
    step()
}
