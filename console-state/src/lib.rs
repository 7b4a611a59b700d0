//! Client-side state and view-model logic for the RAG Studio console.
//!
//! Everything here mediates between operator input and the remote service:
//! parameter validation/minimal encoding ([`model_params`]), draft state
//! with last-writer-wins reconciliation ([`settings_draft`]), pagination
//! ([`file_table`]), the active conversation and persisted chat history
//! ([`chat_log`], [`history`]), busy signalling ([`busy`]), and the
//! persisted anonymous user id ([`user_id`]). No module talks to the
//! network; the console wires these to `studio-client`.

pub mod busy;
pub mod chat_log;
pub mod error;
pub mod file_table;
pub mod history;
pub mod model_params;
pub mod prompt_defaults;
pub mod settings_draft;
pub mod user_id;

pub use busy::{BusyGuard, BusySink, NoopBusy, SpinnerBusy};
pub use chat_log::{Conversation, SEED_SYSTEM_PROMPT};
pub use error::ConsoleStateError;
pub use file_table::{FileTable, PAGE_SIZE};
pub use history::{ChatHistoryList, HistorySelection, display_label};
pub use model_params::{
    DEFAULT_MODEL_PARAMS, MaxTokensDefault, ModelParams,
};
pub use settings_draft::SettingsDraft;
