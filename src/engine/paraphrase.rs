//! Synonym substitution over assembled replies.
//!
//! Whole words found in the synonym table are swapped for a random
//! alternative, matching case-insensitively and keeping a leading capital.
//! Everything else, including punctuation and spacing, passes through
//! unchanged.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Synonym;

// ---------------------------------------------------------------------------
// Paraphraser
// ---------------------------------------------------------------------------

/// Case-insensitive whole-word synonym substitution.
pub struct Paraphraser {
    table: HashMap<String, Vec<String>>,
}

impl Paraphraser {
    /// Build from catalog synonyms.  Entries without alternatives are ignored.
    pub fn new(synonyms: &[Synonym]) -> Self {
        let table = synonyms
            .iter()
            .filter(|s| !s.alternatives.is_empty())
            .map(|s| (s.word.to_lowercase(), s.alternatives.clone()))
            .collect();
        Self { table }
    }

    /// Rewrite `text`, replacing each vocabulary word independently.
    pub fn apply<R: Rng>(&self, text: &str, rng: &mut R) -> String {
        if self.table.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 16);
        let mut word = String::new();

        for ch in text.chars() {
            if ch.is_alphanumeric() {
                word.push(ch);
            } else {
                self.flush_word(&mut word, &mut out, rng);
                out.push(ch);
            }
        }
        self.flush_word(&mut word, &mut out, rng);

        out
    }

    /// Number of vocabulary words.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn flush_word<R: Rng>(&self, word: &mut String, out: &mut String, rng: &mut R) {
        if word.is_empty() {
            return;
        }
        let replacement = self
            .table
            .get(&word.to_lowercase())
            .and_then(|alts| alts.choose(rng));

        match replacement {
            Some(alt) if starts_uppercase(word) => out.push_str(&capitalize(alt)),
            Some(alt) => out.push_str(alt),
            None => out.push_str(word),
        }
        word.clear();
    }
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
