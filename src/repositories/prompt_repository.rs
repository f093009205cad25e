use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppResult;
use crate::models::domain::PromptEntry;
use crate::storage::LocalStore;

const PROMPTS_FILE: &str = "prompts.json";

#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<PromptEntry>>;
    async fn record(&self, prompt: &str) -> AppResult<()>;
    async fn remove(&self, prompt: &str) -> AppResult<()>;
}

pub struct FilePromptRepository {
    store: Arc<LocalStore>,
}

impl FilePromptRepository {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    // A history file that no longer parses loses the history, not the app.
    fn load_entries(&self) -> AppResult<Vec<PromptEntry>> {
        let contents = match self.store.read(PROMPTS_FILE)? {
            Some(contents) => contents,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                log::warn!("Prompt history is unreadable, starting fresh: {}", err);
                Ok(Vec::new())
            }
        }
    }

    fn save_entries(&self, entries: &[PromptEntry]) -> AppResult<()> {
        self.store
            .write(PROMPTS_FILE, &serde_json::to_string_pretty(entries)?)
    }
}

#[async_trait]
impl PromptRepository for FilePromptRepository {
    async fn list(&self) -> AppResult<Vec<PromptEntry>> {
        self.load_entries()
    }

    /// Dedup by exact trimmed text: a reused prompt keeps its place in
    /// first-use order and only refreshes `last_used_at`.
    async fn record(&self, prompt: &str) -> AppResult<()> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let mut entries = self.load_entries()?;
        match entries.iter_mut().find(|entry| entry.text == trimmed) {
            Some(entry) => entry.last_used_at = Utc::now(),
            None => {
                log::info!("Recording new prompt in history");
                entries.push(PromptEntry::new(trimmed));
            }
        }
        self.save_entries(&entries)
    }

    async fn remove(&self, prompt: &str) -> AppResult<()> {
        let trimmed = prompt.trim();
        let mut entries = self.load_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.text != trimmed);
        if entries.len() != before {
            log::info!("Removing prompt from history");
            self.save_entries(&entries)?;
        }
        Ok(())
    }
}
