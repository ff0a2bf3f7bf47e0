use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a chat message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub sender: Sender,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp: Local::now(),
            sender,
        }
    }
}

/// Append-only, display-ordered chat history
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &Message {
        self.messages.push(Message::new(sender, text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Texts of the bot messages, oldest first
    pub fn bot_texts(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::Bot)
            .map(|m| m.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut log = MessageLog::new();
        log.push(Sender::Bot, "hello");
        log.push(Sender::User, "District 1");
        log.push(Sender::Bot, "next");

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "District 1", "next"]);
        assert_eq!(log.bot_texts(), vec!["hello", "next"]);
        assert_eq!(log.last().map(|m| m.sender), Some(Sender::Bot));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut log = MessageLog::new();
        let first = log.push(Sender::Bot, "a").id;
        let second = log.push(Sender::Bot, "a").id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_clear() {
        let mut log = MessageLog::new();
        log.push(Sender::User, "x");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let message = Message::new(Sender::Bot, "hi");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["sender"], "bot");
        assert_eq!(value["text"], "hi");
    }
}
