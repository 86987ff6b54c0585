use std::thread;
use std::time::{Duration, Instant};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tinypomo_core::{Control, ControlSource};

pub struct KeyBindings {
    pub pause: Vec<KeyCode>,
    pub cancel: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pause: vec![KeyCode::Char('p'), KeyCode::Char(' ')],
            cancel: vec![KeyCode::Char('q'), KeyCode::Esc],
        }
    }
}

impl KeyBindings {
    pub fn control_for(&self, key: &KeyEvent) -> Option<Control> {
        // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Control::Cancel);
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        if self.pause.contains(&code) {
            Some(Control::TogglePause)
        } else if self.cancel.contains(&code) {
            Some(Control::Cancel)
        } else {
            None
        }
    }
}

/// Reads pause/cancel keys from the terminal. Needs raw mode.
pub struct KeyboardControls {
    bindings: KeyBindings,
}

impl KeyboardControls {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }
}

impl ControlSource for KeyboardControls {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Control>> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(control) = self.bindings.control_for(&key) {
                        return Ok(Some(control));
                    }
                }
            }
            if left.is_zero() {
                return Ok(None);
            }
        }
    }
}

/// Used when stdin is not a terminal: just waits out the tick.
pub struct IdleControls;

impl ControlSource for IdleControls {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Control>> {
        thread::sleep(timeout);
        Ok(None)
    }
}
