use serde_json::Value;

use super::theme::Theme;
use crate::app::Config;
use crate::constants::RESET_COMMAND;
use crate::conversation::{LookupRequest, Session, Ticket};
use crate::utils::BusChatError;

/// Application state
pub struct App {
    /// The conversation being displayed
    pub session: Session,
    /// User input buffer
    pub input: String,
    /// Is the app running?
    pub running: bool,
    /// Lines scrolled up from the bottom of the chat
    pub scroll_offset: u16,
    /// Status message
    pub status_message: Option<String>,
    /// Name shown on bot messages
    pub bot_name: String,
    /// Directions service shown in the header
    pub service_url: String,
    pub show_timestamps: bool,
    pub theme: Theme,
}

impl App {
    /// Create a new app instance
    pub fn new(config: &Config, service_url: String) -> Self {
        Self {
            session: Session::new(),
            input: String::new(),
            running: true,
            scroll_offset: 0,
            status_message: None,
            bot_name: config.ui.bot_name.clone(),
            service_url,
            show_timestamps: config.ui.show_timestamps,
            theme: Theme::from_name(&config.ui.theme),
        }
    }

    /// Send the input buffer to the conversation.
    ///
    /// Returns the lookups to start. While a lookup is in flight only
    /// `reset` gets through; anything else stays in the buffer.
    pub fn submit(&mut self) -> Vec<LookupRequest> {
        if self.input.is_empty() {
            return Vec::new();
        }

        if self.session.is_waiting() && self.input != RESET_COMMAND {
            self.set_status("Still looking up your route, please wait...");
            return Vec::new();
        }

        let text = std::mem::take(&mut self.input);
        self.clear_status();
        self.scroll_offset = 0;
        self.session.utter(text)
    }

    /// Apply the outcome of a lookup started by `submit`
    pub fn apply_lookup(&mut self, ticket: Ticket, result: Result<Value, BusChatError>) {
        if !self.session.complete(ticket, result) {
            return;
        }
        self.clear_status();

        // Auto-scroll to bottom
        self.scroll_offset = 0;
    }

    /// What the user is expected to type next, for the status bar
    pub fn prompt_hint(&self) -> &'static str {
        if self.session.is_waiting() {
            "Looking up route..."
        } else {
            self.session.mode().label()
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Scroll chat view up, towards older messages
    pub fn scroll_up(&mut self, amount: u16, max_scroll: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
    }

    /// Scroll chat view down, towards the newest message
    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Which keys the UI loop is listening for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Normal mode - scrolling the chat
    Normal,
    /// Insert mode - typing input
    Insert,
}
