//! Persisted anonymous user id.
//!
//! The runner scopes chat history to an anonymous identity. In the browser
//! this lived in a long-lived cookie; here it is a small state file holding
//! one UUID, created on first use and reused forever after.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ConsoleStateError;

/// Returns the persisted user id, generating and storing a fresh UUIDv4
/// when none exists yet.
///
/// # Errors
/// [`ConsoleStateError::Io`] when the state file cannot be written.
pub fn load_or_create(path: &Path) -> Result<String, ConsoleStateError> {
    if let Ok(existing) = fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            debug!(user_id = %trimmed, "reusing persisted user id");
            return Ok(trimmed.to_string());
        }
    }

    let fresh = Uuid::new_v4().to_string();
    fs::write(path, &fresh)?;
    info!(user_id = %fresh, path = %path.display(), "created anonymous user id");
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_created_once_and_reused() {
        let dir = std::env::temp_dir().join(format!("user-id-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("user_id");

        let first = load_or_create(&path).unwrap();
        let second = load_or_create(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 36);

        fs::remove_dir_all(&dir).unwrap();
    }
}
