//! Conversation state carried between questions.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tutor_core::{AppError, AppResult};

/// Longest context kept for the next turn, in characters.
pub const MAX_SESSION_CHARS: usize = 3900;

/// The most recent context block, reused by follow-ups and answer checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    last_context: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous context, if a non-empty one was stored.
    pub fn last_context(&self) -> Option<&str> {
        self.last_context.as_deref().filter(|c| !c.is_empty())
    }

    /// Replace the stored context, keeping at most `MAX_SESSION_CHARS` characters.
    pub fn remember(&mut self, context: &str) {
        let truncated = match context.char_indices().nth(MAX_SESSION_CHARS) {
            Some((end, _)) => &context[..end],
            None => context,
        };
        self.last_context = Some(truncated.to_string());
    }

    pub fn clear(&mut self) {
        self.last_context = None;
    }

    /// Load from a JSON file; a missing file is a fresh session.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Serialization(format!("Invalid session file {:?}: {}", path, e)))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
