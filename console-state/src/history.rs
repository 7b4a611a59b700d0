//! Chat-history list: display labels and conversation selection.
//!
//! The server keeps one record per persisted conversation, most recent
//! first. The console shows a one-line label per record and lets the user
//! resume any of them — or start over via the new-chat sentinel.

use studio_client::{ChatHistoryRecord, ChatRole};
use tracing::warn;

use crate::chat_log::Conversation;

/// Labels longer than this many characters get truncated.
const LABEL_MAX_CHARS: usize = 40;
/// How much of the content survives truncation (before the ellipsis).
const LABEL_KEPT_CHARS: usize = 37;

/// What the user picked from the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySelection {
    /// The "begin a new chat" sentinel.
    NewChat,
    /// Resume the record at this index (0 = most recent).
    Record(usize),
}

/// One-line label for a history record: the opening user message, truncated,
/// plus a message count. Records with no user message render empty.
pub fn display_label(record: &ChatHistoryRecord) -> String {
    let Some(first_user) = record
        .messages
        .iter()
        .find(|m| m.role == ChatRole::User)
    else {
        return String::new();
    };

    let content = &first_user.content;
    let head: String = if content.chars().count() > LABEL_MAX_CHARS {
        let kept: String = content.chars().take(LABEL_KEPT_CHARS).collect();
        format!("{kept}...")
    } else {
        content.clone()
    };

    format!("{head} [{} messages]", record.messages.len())
}

/// The history list plus which entry (if any) backs the active conversation.
#[derive(Debug, Clone, Default)]
pub struct ChatHistoryList {
    records: Vec<ChatHistoryRecord>,
    selected: Option<usize>,
}

impl ChatHistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ChatHistoryRecord] {
        &self.records
    }

    /// Index of the record backing the active conversation; `None` while a
    /// new (unsaved) chat is active.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(display_label).collect()
    }

    /// Applies a selection to the active conversation: resuming replaces its
    /// messages wholesale, the sentinel clears back to the seed. Out-of-range
    /// indices are ignored.
    pub fn select(&mut self, selection: HistorySelection, conversation: &mut Conversation) {
        match selection {
            HistorySelection::NewChat => {
                conversation.clear();
                self.selected = None;
            }
            HistorySelection::Record(index) => match self.records.get(index) {
                Some(record) => {
                    conversation.replace(record.messages.clone());
                    self.selected = Some(index);
                }
                None => warn!(index, "history selection out of range; ignored"),
            },
        }
    }

    /// Replaces the records without touching the selection (initial load).
    pub fn refresh(&mut self, records: Vec<ChatHistoryRecord>) {
        self.records = records;
        if let Some(i) = self.selected {
            if i >= self.records.len() {
                self.selected = None;
            }
        }
    }

    /// Replaces the records after a successful chat turn: the server lists
    /// the just-updated conversation first, so index 0 becomes the active
    /// selection.
    pub fn refresh_select_newest(&mut self, records: Vec<ChatHistoryRecord>) {
        self.records = records;
        self.selected = if self.records.is_empty() { None } else { Some(0) };
    }
}

#[cfg(test)]
mod tests {
    use studio_client::ChatMessage;

    use super::*;

    fn record(key: &str, messages: Vec<ChatMessage>) -> ChatHistoryRecord {
        ChatHistoryRecord {
            key: key.to_string(),
            messages,
        }
    }

    #[test]
    fn long_opening_message_is_truncated() {
        let rec = record(
            "a",
            vec![ChatMessage::user(
                "Hello there, this is a fairly long opening message",
            )],
        );
        let label = display_label(&rec);
        assert_eq!(label, "Hello there, this is a fairly long op... [1 messages]");
        // 37 kept characters + ellipsis + suffix
        assert_eq!(label.split(" [").next().unwrap().chars().count(), 40);
    }

    #[test]
    fn short_opening_message_is_kept_whole() {
        let rec = record(
            "a",
            vec![
                ChatMessage::system("seed"),
                ChatMessage::user("Where is the config?"),
                ChatMessage::assistant("In settings.json"),
            ],
        );
        assert_eq!(display_label(&rec), "Where is the config? [3 messages]");
    }

    #[test]
    fn empty_or_userless_records_render_empty_labels() {
        assert_eq!(display_label(&record("b", vec![])), "");
        let userless = record("c", vec![ChatMessage::system("seed")]);
        assert_eq!(display_label(&userless), "");
    }

    #[test]
    fn selection_replaces_or_clears_the_conversation() {
        let mut list = ChatHistoryList::new();
        list.refresh(vec![record(
            "a",
            vec![ChatMessage::user("q"), ChatMessage::assistant("a")],
        )]);

        let mut convo = Conversation::seeded();
        list.select(HistorySelection::Record(0), &mut convo);
        assert_eq!(convo.messages().len(), 2);
        assert_eq!(list.selected(), Some(0));

        list.select(HistorySelection::NewChat, &mut convo);
        assert_eq!(convo.messages().len(), 1);
        assert_eq!(list.selected(), None);

        // Out of range: no change.
        list.select(HistorySelection::Record(5), &mut convo);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn refresh_after_turn_selects_the_newest_record() {
        let mut list = ChatHistoryList::new();
        list.refresh_select_newest(vec![
            record("new", vec![ChatMessage::user("latest")]),
            record("old", vec![ChatMessage::user("earlier")]),
        ]);
        assert_eq!(list.selected(), Some(0));
    }
}
