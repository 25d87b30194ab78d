use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    /// Animated spinners on stderr.
    pub spinners: bool,
    /// Plain `* step ...` lines when spinners are off.
    pub steps: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let visible = !flags.quiet && flags.format != OutputFormat::Json;
    let is_tty = std::io::stderr().is_terminal();

    let _ = UI_PREFS.set(UiPrefs {
        spinners: visible && is_tty,
        steps: visible && !is_tty,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        spinners: false,
        steps: false,
    })
}
