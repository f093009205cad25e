use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved prompt. History keeps each trimmed text once, in first-use
/// order; `last_used_at` refreshes when the prompt is reused.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptEntry {
    pub text: String,
    pub last_used_at: DateTime<Utc>,
}

impl PromptEntry {
    pub fn new(text: &str) -> Self {
        PromptEntry {
            text: text.to_string(),
            last_used_at: Utc::now(),
        }
    }
}
