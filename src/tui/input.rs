use crossterm::event::{KeyCode, KeyEvent};

/// Maps key presses in insert mode to editing actions
pub struct InputHandler {}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {}
    }

    /// Process a key event
    pub fn handle_key(&self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Esc => InputAction::Cancel,
            KeyCode::Char(c) => InputAction::Insert(c),
            KeyCode::Backspace => InputAction::Delete,
            KeyCode::Up => InputAction::ScrollUp,
            KeyCode::Down => InputAction::ScrollDown,
            KeyCode::PageUp => InputAction::PageUp,
            KeyCode::PageDown => InputAction::PageDown,
            _ => InputAction::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Cancel,
    Insert(char),
    Delete,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    None,
}
