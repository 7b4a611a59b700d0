//! Wire DTOs shared by the studio and inference services.

pub mod chat;
pub mod evaluation;
pub mod logs;
pub mod openai_api;
pub mod requests;
pub mod snapshot;
