//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a settings file only needs the
//! keys it overrides.
//!
//! The numeric thresholds are empirically chosen product constants; they are
//! exposed here so they can be tuned without touching the engine.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

/// Thresholds and weights for FAQ matching and intent scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum token overlap for an FAQ entry to preempt intent scoring.
    pub faq_threshold: f64,
    /// Added to an intent's score for every tag found verbatim in the message.
    pub tag_boost: f64,
    /// Weight of the recent-history overlap term.
    pub history_weight: f64,
    /// Number of trailing user messages that contribute to the history term.
    pub history_user_turns: usize,
    /// Winning scores below this floor produce a `clarify` result.
    pub clarify_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            faq_threshold: 0.35,
            tag_boost: 0.35,
            history_weight: 0.6,
            history_user_turns: 6,
            clarify_floor: 0.12,
        }
    }
}

// ---------------------------------------------------------------------------
// AssemblyConfig
// ---------------------------------------------------------------------------

/// Probabilities and limits used by the response assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Chance of starting with an opener.
    pub opener_probability: f64,
    /// Chance of using one core line instead of two.
    pub single_core_probability: f64,
    /// Chance of quoting the recent user excerpt.
    pub context_ack_probability: f64,
    /// Chance of asking a follow-up question.
    pub followup_probability: f64,
    /// Chance of ending with a closer.
    pub closer_probability: f64,
    /// A history message must be longer than this (in characters) to be quoted.
    pub excerpt_min_chars: usize,
    /// Quoted excerpts are truncated to this many characters.
    pub excerpt_max_chars: usize,
    /// Sleep below this many hours gets the "low" remark.
    pub sleep_low_hours: f64,
    /// Sleep at or above this many hours gets the "healthy" remark.
    pub sleep_healthy_hours: f64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            opener_probability: 0.85,
            single_core_probability: 0.4,
            context_ack_probability: 0.6,
            followup_probability: 0.6,
            closer_probability: 0.5,
            excerpt_min_chars: 20,
            excerpt_max_chars: 80,
            sleep_low_hours: 5.5,
            sleep_healthy_hours: 7.0,
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogConfig
// ---------------------------------------------------------------------------

/// Where conversation data comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in tables.  `None` uses the built-in
    /// catalog.
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// ConversationConfig
// ---------------------------------------------------------------------------

/// Settings for the caller-side rolling conversation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Number of messages kept per conversation.
    pub window_size: usize,
    /// Seconds of inactivity after which the window is cleared.
    pub idle_reset_secs: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            idle_reset_secs: 1800,
        }
    }
}

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Reply style requested from the remote backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Soothing, slow-paced replies.
    #[default]
    Calm,
    /// Encouraging, action-oriented replies.
    Motivate,
    /// Present-moment, sensory replies.
    Grounding,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Calm, Tone::Motivate, Tone::Grounding];

    /// Tone named `name` (case-insensitive), as typed by a user.
    pub fn from_name(name: &str) -> Option<Tone> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(name))
    }

    /// Wire value sent as `selectedMode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Calm => "calm",
            Tone::Motivate => "motivate",
            Tone::Grounding => "grounding",
        }
    }
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

/// Optional remote chat/voice backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Whether to call the backend at all.  The local engine is used when
    /// disabled or when a call fails.
    pub enabled: bool,
    /// Base URL; requests go to `{base_url}/api/voice`.
    pub base_url: String,
    /// Bearer token, `None` for unauthenticated backends.
    pub api_key: Option<String>,
    /// Reply style.
    pub tone: Tone,
    /// Maximum seconds to wait for a reply.
    pub timeout_secs: u64,
    /// Number of trailing messages forwarded as history.
    pub history_messages: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:4000".into(),
            api_key: None,
            tone: Tone::default(),
            timeout_secs: 15,
            history_messages: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use mindbot_triage::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.scoring.faq_threshold > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub assembly: AssemblyConfig,
    pub catalog: CatalogConfig,
    pub conversation: ConversationConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.scoring.faq_threshold, 0.35);
        assert_eq!(cfg.scoring.tag_boost, 0.35);
        assert_eq!(cfg.scoring.history_weight, 0.6);
        assert_eq!(cfg.scoring.history_user_turns, 6);
        assert_eq!(cfg.scoring.clarify_floor, 0.12);
        assert_eq!(cfg.assembly.opener_probability, 0.85);
        assert_eq!(cfg.assembly.excerpt_max_chars, 80);
        assert_eq!(cfg.assembly.sleep_low_hours, 5.5);
        assert_eq!(cfg.assembly.sleep_healthy_hours, 7.0);
        assert!(cfg.catalog.path.is_none());
        assert!(!cfg.backend.enabled);
        assert!(cfg.backend.api_key.is_none());
        assert_eq!(cfg.backend.tone, Tone::Calm);
        assert_eq!(cfg.conversation.window_size, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[scoring]\nclarify_floor = 0.2\n\n[backend]\nenabled = true\ntone = \"grounding\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.scoring.clarify_floor, 0.2);
        assert_eq!(cfg.scoring.faq_threshold, 0.35);
        assert!(cfg.backend.enabled);
        assert_eq!(cfg.backend.tone, Tone::Grounding);
        assert_eq!(cfg.backend.base_url, "http://localhost:4000");
        assert_eq!(cfg.assembly, AssemblyConfig::default());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.scoring.history_user_turns = 3;
        cfg.assembly.closer_probability = 1.0;
        cfg.catalog.path = Some(PathBuf::from("/tmp/catalog.json"));
        cfg.backend.api_key = Some("sk-test".into());
        cfg.backend.tone = Tone::Motivate;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.scoring.history_user_turns, 3);
        assert_eq!(loaded.assembly.closer_probability, 1.0);
        assert_eq!(loaded.catalog.path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(loaded.backend.api_key, Some("sk-test".into()));
        assert_eq!(loaded.backend.tone, Tone::Motivate);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[scoring\nfaq_threshold = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn tone_wire_values() {
        assert_eq!(Tone::Calm.as_str(), "calm");
        assert_eq!(Tone::Motivate.as_str(), "motivate");
        assert_eq!(Tone::Grounding.as_str(), "grounding");
        for tone in Tone::ALL {
            let json = serde_json::to_value(tone).unwrap();
            assert_eq!(json, tone.as_str());
        }
    }

    #[test]
    fn tone_from_name() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_name(tone.as_str()), Some(tone));
        }
        assert_eq!(Tone::from_name(" Motivate "), Some(Tone::Motivate));
        assert_eq!(Tone::from_name("angry"), None);
        assert_eq!(Tone::from_name(""), None);
    }
}
