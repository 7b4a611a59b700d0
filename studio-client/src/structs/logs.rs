//! Server log tail payload.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/logs?num_lines=N`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<String>,
}

impl LogsResponse {
    /// Joins the raw lines for display. Log lines terminate with their own
    /// newline, so no separator is inserted.
    pub fn display(&self) -> String {
        self.logs.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_preserves_embedded_newlines() {
        let resp = LogsResponse {
            logs: vec!["first\n".into(), "second\n".into()],
        };
        assert_eq!(resp.display(), "first\nsecond\n");
    }
}
