pub mod app;
pub mod ui;

use std::io::{self, IsTerminal};
use std::time::Duration;
use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tinypomo_core::{Outcome, SessionUseCase, SystemClock};

use crate::tui::app::{IdleControls, KeyBindings, KeyboardControls};
use crate::tui::ui::{InlineView, PlainView};

/// Runs one countdown on the terminal. Falls back to a plain text line
/// without key controls when stdin or stdout is redirected.
pub fn run(duration: Duration, bindings: KeyBindings) -> Result<Outcome> {
    let session = SessionUseCase::new(SystemClock);

    if !(io::stdin().is_terminal() && io::stdout().is_terminal()) {
        let mut view = PlainView::default();
        let res = session.run(duration, &mut IdleControls, &mut view);
        view.finish();
        return res;
    }

    // Setup terminal
    enable_raw_mode()?;
    let res = InlineView::new().and_then(|mut view| {
        let mut controls = KeyboardControls::new(bindings);
        let res = session.run(duration, &mut controls, &mut view);
        view.finish()?;
        res
    });

    // Restore terminal
    disable_raw_mode()?;
    println!();

    res
}
