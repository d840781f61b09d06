use crate::app::Action;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handles terminal events and maps them to application `Action`s.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key event is received or a timeout occurs.
    pub fn next(&self) -> Result<Action> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(map_key(key));
                }
            }
        }
        Ok(Action::Tick)
    }
}

/// Maps a `KeyEvent` to a corresponding `Action`.
pub fn map_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::Tick,
        };
    }
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '.' || ch == '-' => Action::InputChar(ch),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
        KeyCode::Right => Action::NextPreset,
        KeyCode::Left => Action::PrevPreset,
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::DismissAlert,
        _ => Action::Tick,
    }
}
