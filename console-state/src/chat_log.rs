//! The active conversation: an append-only message list seeded with a
//! system instruction.

use studio_client::{ChatMessage, ChatRole};

/// Seed instruction for a fresh conversation.
pub const SEED_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Append-only conversation state for the chat panels.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Conversation {
    /// A fresh conversation holding only the seed system message.
    pub fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage::system(SEED_SYSTEM_PROMPT)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The message list that a new user turn would send: the current
    /// history plus the pending user message. The conversation itself is
    /// not touched until the turn succeeds.
    pub fn with_user_turn(&self, content: &str) -> Vec<ChatMessage> {
        let mut outgoing = self.messages.clone();
        outgoing.push(ChatMessage::user(content));
        outgoing
    }

    /// Records a completed turn (the user message that was sent and the
    /// assistant's reply).
    pub fn push_turn(&mut self, user_content: &str, assistant_content: &str) {
        self.messages.push(ChatMessage::user(user_content));
        self.messages.push(ChatMessage::assistant(assistant_content));
    }

    /// Replaces the conversation with a resumed history record.
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    /// Clears back to the seeded state (the "begin a new chat" action).
    pub fn clear(&mut self) {
        *self = Self::seeded();
    }

    /// Number of user/assistant exchanges so far.
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::Assistant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_conversation_has_only_the_system_message() {
        let convo = Conversation::seeded();
        assert_eq!(convo.messages().len(), 1);
        assert_eq!(convo.messages()[0].role, ChatRole::System);
        assert_eq!(convo.turn_count(), 0);
    }

    #[test]
    fn with_user_turn_does_not_mutate() {
        let convo = Conversation::seeded();
        let outgoing = convo.with_user_turn("hello");
        assert_eq!(outgoing.len(), 2);
        assert_eq!(convo.messages().len(), 1);
    }

    #[test]
    fn push_turn_appends_in_order() {
        let mut convo = Conversation::seeded();
        convo.push_turn("hello", "hi there");
        assert_eq!(convo.messages().len(), 3);
        assert_eq!(convo.messages()[1].role, ChatRole::User);
        assert_eq!(convo.messages()[2].role, ChatRole::Assistant);
        assert_eq!(convo.turn_count(), 1);

        convo.clear();
        assert_eq!(convo.messages().len(), 1);
    }
}
