//! Text normalisation and token-overlap scoring.
//!
//! Every matcher in the engine works on the output of [`normalize`]:
//! lowercase, non-word characters replaced by spaces, whitespace collapsed.
//! All functions here are total for any `&str`, including the empty string.

use std::collections::HashSet;

/// Lowercase `text`, replace every non-word character with a space, collapse
/// runs of whitespace and trim.
///
/// A word character is any Unicode alphanumeric or `_`.
///
/// ```
/// use mindbot_triage::engine::normalize;
///
/// assert_eq!(normalize("  I can't SLEEP!!  "), "i can t sleep");
/// assert_eq!(normalize("?!..."), "");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split normalised `text` into tokens, dropping empty ones.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Token set of `text`, used as the haystack for [`token_overlap_score`].
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Fraction of `query` tokens present in `haystack`, in `[0, 1]`.
///
/// Repeated query tokens count once per occurrence.  An empty query scores
/// `0.0`.
pub fn token_overlap_score(query: &[String], haystack: &HashSet<String>) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let hits = query.iter().filter(|t| haystack.contains(*t)).count();
    hits as f64 / query.len() as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
