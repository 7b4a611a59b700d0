//! Draft state for one editable setting (a prompt template, a model name).
//!
//! A draft tracks three values: what the server last confirmed, what the
//! user is typing, and the compiled-in default. Submission is only offered
//! when the draft actually differs from the server value; "reset to default"
//! only when it differs from the compiled-in default. After a committed
//! write the caller reloads the snapshot and calls [`SettingsDraft::reconcile`],
//! which applies a last-writer-wins policy: if the server value moved (this
//! console's own write, or another session's), the draft is overwritten and
//! unsaved edits are dropped without ceremony.

use tracing::debug;

/// Server-confirmed value + in-progress draft + compiled-in default.
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    server_value: String,
    draft: String,
    default_value: String,
}

impl SettingsDraft {
    /// Seeds the draft from the server value, with a compiled-in default.
    pub fn new(server_value: impl Into<String>, default_value: impl Into<String>) -> Self {
        let server_value = server_value.into();
        Self {
            draft: server_value.clone(),
            server_value,
            default_value: default_value.into(),
        }
    }

    /// A draft for settings that have no meaningful compiled-in default
    /// (model names): "reset to default" then means "clear".
    pub fn without_default(server_value: impl Into<String>) -> Self {
        Self::new(server_value, "")
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn server_value(&self) -> &str {
        &self.server_value
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Replaces the in-progress draft.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// There is something new to persist.
    pub fn can_submit(&self) -> bool {
        self.draft != self.server_value
    }

    /// There is something to discard in favor of the compiled-in default.
    pub fn can_reset_to_default(&self) -> bool {
        self.draft != self.default_value
    }

    /// Overwrites the draft with the compiled-in default.
    pub fn reset_to_default(&mut self) {
        self.draft = self.default_value.clone();
    }

    /// Reconciles against a freshly loaded server value.
    ///
    /// Last-writer-wins: when the server value changed since last seen, both
    /// the stored server value and the draft move to it, discarding unsaved
    /// edits. Returns `true` when a forced resync happened.
    pub fn reconcile(&mut self, new_server_value: &str) -> bool {
        if new_server_value == self.server_value {
            return false;
        }
        debug!(
            old = %self.server_value,
            new = %new_server_value,
            "server value changed; resynchronizing draft"
        );
        self.server_value = new_server_value.to_string();
        self.draft = self.server_value.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unedited_draft_cannot_submit() {
        let draft = SettingsDraft::new("X", "D");
        assert!(!draft.can_submit());
        assert!(draft.can_reset_to_default());
    }

    #[test]
    fn edited_draft_toggles_both_flags() {
        let mut draft = SettingsDraft::new("X", "D");
        draft.set_draft("Y");
        assert!(draft.can_submit());
        assert!(draft.can_reset_to_default());

        draft.set_draft("D");
        assert!(draft.can_submit());
        assert!(!draft.can_reset_to_default());

        draft.reset_to_default();
        assert_eq!(draft.draft(), "D");
    }

    #[test]
    fn reconcile_is_last_writer_wins() {
        let mut draft = SettingsDraft::new("X", "D");
        draft.set_draft("half-typed edit");

        // Another session wrote "Z"; the local edit is discarded.
        assert!(draft.reconcile("Z"));
        assert_eq!(draft.draft(), "Z");
        assert_eq!(draft.server_value(), "Z");
        assert!(!draft.can_submit());

        // Unchanged server value leaves the draft alone.
        draft.set_draft("new edit");
        assert!(!draft.reconcile("Z"));
        assert_eq!(draft.draft(), "new edit");
    }
}
