/// Keyboard adapter: crossterm events → single characters.
///
/// Drains pending terminal events without blocking and yields the first
/// key press as a character. Arrow keys are reported as the bound
/// direction characters, and Ctrl+C as the quit character, since raw
/// mode swallows SIGINT. Release events and non-key events are skipped.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::config::KeyBindings;
use super::KeySource;

pub struct TerminalKeys {
    bindings: KeyBindings,
}

impl TerminalKeys {
    pub fn new(bindings: KeyBindings) -> Self {
        TerminalKeys { bindings }
    }

    fn translate(&self, key: KeyEvent) -> Option<char> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Some(self.bindings.quit);
        }
        match key.code {
            KeyCode::Char(c) => Some(c),
            KeyCode::Up => Some(self.bindings.up),
            KeyCode::Down => Some(self.bindings.down),
            KeyCode::Left => Some(self.bindings.left),
            KeyCode::Right => Some(self.bindings.right),
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            KeyCode::Esc => Some('\u{1b}'),
            _ => None,
        }
    }
}

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> Option<char> {
        loop {
            match poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    warn!("key poll failed: {e}");
                    return None;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    if let Some(c) = self.translate(key) {
                        return Some(c);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("key read failed: {e}");
                    return None;
                }
            }
        }
    }
}
