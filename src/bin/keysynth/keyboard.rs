//! Terminal keyboard: tracks which synth keys are held.
//!
//! Terminals that speak the kitty keyboard protocol report key releases, so
//! a key is held exactly between its press and release. Everywhere else we
//! only see presses and auto-repeats, and a key counts as held until no
//! repeat has arrived for the hold window.

use std::io::stdout;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

use keysynth::{
    synth::keys::{key_index, KEY_COUNT},
    InstrumentKind,
};

/// Non-note keys the app reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    SwitchInstrument(InstrumentKind),
}

pub struct TerminalKeyboard {
    held: [bool; KEY_COUNT],
    last_seen: [Option<Instant>; KEY_COUNT],
    reports_release: bool,
    hold_window: Duration,
}

impl TerminalKeyboard {
    /// Put the terminal into raw mode, with release reporting if available.
    pub fn enable(hold_window: Duration) -> EyreResult<Self> {
        terminal::enable_raw_mode().wrap_err("failed to enable raw mode")?;

        let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .wrap_err("failed to enable key release events")?;
        } else {
            tracing::info!(
                hold_window_ms = hold_window.as_millis() as u64,
                "terminal cannot report key releases, using hold window"
            );
        }

        Ok(Self {
            held: [false; KEY_COUNT],
            last_seen: [None; KEY_COUNT],
            reports_release,
            hold_window,
        })
    }

    pub fn held(&self) -> &[bool; KEY_COUNT] {
        &self.held
    }

    /// Wait up to `timeout` for input, then drain everything pending.
    pub fn poll(&mut self, timeout: Duration) -> EyreResult<Option<Command>> {
        let mut command = None;
        let mut wait = timeout;

        while event::poll(wait)? {
            wait = Duration::ZERO;
            if let Event::Key(key) = event::read()? {
                if let Some(cmd) = self.handle_key(key) {
                    command = Some(cmd);
                }
            }
        }

        if !self.reports_release {
            self.expire_stale_keys(Instant::now());
        }
        Ok(command)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        match key.code {
            KeyCode::Esc if pressed => Some(Command::Quit),
            KeyCode::Char('c') if pressed && key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(digit @ '1'..='9') if key.kind == KeyEventKind::Press => {
                let index = digit as usize - '1' as usize;
                InstrumentKind::ALL
                    .get(index)
                    .map(|&kind| Command::SwitchInstrument(kind))
            }
            KeyCode::Char(c) => {
                if let Some(k) = key_index(c) {
                    if pressed {
                        self.held[k] = true;
                        self.last_seen[k] = Some(Instant::now());
                    } else {
                        self.held[k] = false;
                        self.last_seen[k] = None;
                    }
                }
                None
            }
            _ => None,
        }
    }

    fn expire_stale_keys(&mut self, now: Instant) {
        for (held, seen) in self.held.iter_mut().zip(self.last_seen.iter_mut()) {
            if let Some(at) = *seen {
                if now.duration_since(at) > self.hold_window {
                    *held = false;
                    *seen = None;
                }
            }
        }
    }
}

impl Drop for TerminalKeyboard {
    fn drop(&mut self) {
        if self.reports_release {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = terminal::disable_raw_mode();
    }
}
