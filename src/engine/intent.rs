//! Intent scoring from message overlap, exact tag phrases and recent history.
//!
//! For every intent the score is
//!
//! ```text
//! overlap(message tokens, tags + cores)
//!   + tag_boost      × (tags found verbatim in the normalised message)
//!   + history_weight × overlap(recent user tokens, tags)
//! ```
//!
//! The history term lets a sustained topic carry short replies such as
//! "yeah" or "okay".  The winner is the highest score, ties going to the
//! intent that comes first in the catalog.  A winner below the clarify floor
//! is reported as [`Classification::Clarify`].

use std::collections::HashSet;

use crate::catalog::Intent;
use crate::config::ScoringConfig;
use crate::engine::normalize::{normalize, token_overlap_score, token_set, tokenize};
use crate::triage::Message;

// ---------------------------------------------------------------------------
// ScoreBoard
// ---------------------------------------------------------------------------

/// Per-request intent scores, kept in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    scores: Vec<(String, f64)>,
}

impl ScoreBoard {
    /// Score of `key`, if the intent exists.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, score)| *score)
    }

    /// Highest score; the first intent in catalog order wins ties.
    pub fn best(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (key, score) in &self.scores {
            if best.map_or(true, |(_, s)| *score > s) {
                best = Some((key.as_str(), *score));
            }
        }
        best
    }

    /// `(key, score)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, s)| (k.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Outcome of intent classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A confident match.
    Intent { key: String, score: f64 },
    /// The best score stayed below the clarify floor.
    Clarify { score: f64 },
}

// ---------------------------------------------------------------------------
// IntentScorer
// ---------------------------------------------------------------------------

struct ScoredIntent {
    key: String,
    /// Normalised tags for the verbatim phrase check.
    tags: Vec<String>,
    /// Tokens of tags and core lines.
    haystack: HashSet<String>,
    /// Tokens of tags only, for the history term.
    tag_tokens: HashSet<String>,
}

/// Scores messages against the intent catalog.
pub struct IntentScorer {
    intents: Vec<ScoredIntent>,
    config: ScoringConfig,
}

impl IntentScorer {
    /// Precompute token sets for `intents`.
    pub fn new(intents: &[Intent], config: ScoringConfig) -> Self {
        let intents = intents
            .iter()
            .map(|intent| {
                let tags_joined = intent.tags.join(" ");
                ScoredIntent {
                    key: intent.key.clone(),
                    tags: intent
                        .tags
                        .iter()
                        .map(|t| normalize(t))
                        .filter(|t| !t.is_empty())
                        .collect(),
                    haystack: token_set(&format!("{} {}", tags_joined, intent.cores.join(" "))),
                    tag_tokens: token_set(&tags_joined),
                }
            })
            .collect();
        Self { intents, config }
    }

    /// Score every intent for `text` given the trailing `history`.
    pub fn score(&self, text: &str, history: &[Message]) -> ScoreBoard {
        let normalized = normalize(text);
        let tokens: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();
        let recent = self.recent_user_tokens(history);

        let scores = self
            .intents
            .iter()
            .map(|intent| {
                let overlap = token_overlap_score(&tokens, &intent.haystack);
                let tag_hits = intent
                    .tags
                    .iter()
                    .filter(|tag| normalized.contains(tag.as_str()))
                    .count();
                let tag_boost = tag_hits as f64 * self.config.tag_boost;
                let history_boost =
                    token_overlap_score(&recent, &intent.tag_tokens) * self.config.history_weight;
                (intent.key.clone(), overlap + tag_boost + history_boost)
            })
            .collect();

        ScoreBoard { scores }
    }

    /// Pick the winner from `board`, applying the clarify floor.
    pub fn classify(&self, board: &ScoreBoard) -> Classification {
        match board.best() {
            Some((key, score)) if score >= self.config.clarify_floor => Classification::Intent {
                key: key.to_string(),
                score,
            },
            Some((_, score)) => Classification::Clarify { score },
            None => Classification::Clarify { score: 0.0 },
        }
    }

    /// Tokens of the last `history_user_turns` user messages, oldest first.
    fn recent_user_tokens(&self, history: &[Message]) -> Vec<String> {
        let mut recent: Vec<&Message> = history
            .iter()
            .rev()
            .filter(|m| m.is_user())
            .take(self.config.history_user_turns)
            .collect();
        recent.reverse();

        let joined = recent
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        tokenize(&joined)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
