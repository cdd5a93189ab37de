//! Read-only conversation data: FAQ corpus, intent clause banks, synonyms,
//! crisis phrases, tool triggers and fixed replies.
//!
//! The catalog is plain data.  [`Catalog::builtin`] returns the tables that
//! ship with the crate; [`Catalog::load_from`] replaces them with a JSON file
//! so the wording can be changed without touching the scoring code.
//!
//! | Platform | Default override path |
//! |----------|-----------------------|
//! | Windows  | `%APPDATA%\mindbot-triage\catalog.json` |
//! | macOS    | `~/Library/Application Support/mindbot-triage/catalog.json` |
//! | Linux    | `~/.config/mindbot-triage/catalog.json` |

mod builtin;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Tool;

/// Key of the intent that must always be present.
pub const DEFAULT_INTENT: &str = "default";

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read or written.
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// No intent with key [`DEFAULT_INTENT`].
    #[error("catalog has no \"default\" intent")]
    MissingDefaultIntent,

    /// Two intents share a key.
    #[error("duplicate intent key: {0}")]
    DuplicateIntent(String),

    /// The crisis phrase list is empty (or only punctuation).
    #[error("catalog has no crisis phrases")]
    NoCrisisFragments,

    /// The fixed crisis reply is blank.
    #[error("catalog crisis reply is empty")]
    EmptyCrisisReply,
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One FAQ question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A supportive topic with its tags and clause banks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub key: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub openers: Vec<String>,
    #[serde(default)]
    pub cores: Vec<String>,
    #[serde(default)]
    pub followups: Vec<String>,
    #[serde(default)]
    pub closers: Vec<String>,
}

/// A word and the interchangeable forms the paraphrase pass may use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synonym {
    pub word: String,
    pub alternatives: Vec<String>,
}

/// Phrases that suggest a particular exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTrigger {
    pub tool: Tool,
    pub phrases: Vec<String>,
}

/// Fixed, non-randomised reply strings.
///
/// `sleep_*` templates contain an `{hours}` placeholder; `context_ack`
/// contains an `{excerpt}` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replies {
    pub crisis: String,
    pub empty: String,
    pub fallback: String,
    pub clarify: String,
    pub sleep_low: String,
    pub sleep_borderline: String,
    pub sleep_healthy: String,
    pub context_ack: String,
}

/// Complete conversation catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub faqs: Vec<FaqEntry>,
    /// Catalog order is the tie-break order for intent scoring.
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    pub crisis_fragments: Vec<String>,
    #[serde(default)]
    pub tool_triggers: Vec<ToolTrigger>,
    pub replies: Replies,
}

impl Catalog {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// The tables that ship with the crate.  Always valid.
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Load and validate a catalog from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&data)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Write the catalog as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check the structural guarantees the engine relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for intent in &self.intents {
            if !seen.insert(intent.key.as_str()) {
                return Err(CatalogError::DuplicateIntent(intent.key.clone()));
            }
        }
        if !seen.contains(DEFAULT_INTENT) {
            return Err(CatalogError::MissingDefaultIntent);
        }

        let has_fragment = self
            .crisis_fragments
            .iter()
            .any(|f| f.chars().any(char::is_alphanumeric));
        if !has_fragment {
            return Err(CatalogError::NoCrisisFragments);
        }

        if self.replies.crisis.trim().is_empty() {
            return Err(CatalogError::EmptyCrisisReply);
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Intent with the given key.
    pub fn intent(&self, key: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.key == key)
    }

    /// The mandatory `default` intent.
    ///
    /// Only `None` for catalogs that were never validated.
    pub fn default_intent(&self) -> Option<&Intent> {
        self.intent(DEFAULT_INTENT)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
