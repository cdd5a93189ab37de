//! Fuzzy FAQ lookup by token overlap.
//!
//! Each entry's haystack is the token set of its question plus its tags.  A
//! query matches the entry with the highest overlap score, provided that
//! score reaches the configured threshold.  Ties go to the entry that comes
//! first in the catalog, so lookups are reproducible.

use std::collections::HashSet;

use crate::catalog::FaqEntry;
use crate::engine::normalize::{token_overlap_score, token_set, tokenize};

// ---------------------------------------------------------------------------
// FaqMatch
// ---------------------------------------------------------------------------

/// A successful FAQ lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqMatch<'a> {
    pub entry: &'a FaqEntry,
    /// Position of `entry` in the catalog.
    pub index: usize,
    /// Overlap score in `[threshold, 1]`.
    pub score: f64,
}

// ---------------------------------------------------------------------------
// FaqMatcher
// ---------------------------------------------------------------------------

/// Token-overlap FAQ matcher over a fixed corpus.
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    haystacks: Vec<HashSet<String>>,
    threshold: f64,
}

impl FaqMatcher {
    /// Precompute haystacks for `entries`.
    pub fn new(entries: &[FaqEntry], threshold: f64) -> Self {
        let haystacks = entries
            .iter()
            .map(|e| token_set(&format!("{} {}", e.question, e.tags.join(" "))))
            .collect();
        Self {
            entries: entries.to_vec(),
            haystacks,
            threshold,
        }
    }

    /// Best-scoring entry and its score, ignoring the threshold.
    ///
    /// `None` for an empty corpus or a query without tokens.
    pub fn best(&self, query: &str) -> Option<FaqMatch<'_>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, haystack) in self.haystacks.iter().enumerate() {
            let score = token_overlap_score(&tokens, haystack);
            // Strict comparison keeps the first entry on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((index, score));
            }
        }

        best.map(|(index, score)| FaqMatch {
            entry: &self.entries[index],
            index,
            score,
        })
    }

    /// Entry answering `query`, or `None` when no entry reaches the threshold.
    pub fn find(&self, query: &str) -> Option<FaqMatch<'_>> {
        self.best(query).filter(|m| m.score >= self.threshold)
    }

    /// Configured match threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
