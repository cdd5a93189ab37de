//! Keyword-based crisis detection.
//!
//! [`CrisisDetector`] flags any message whose normalised text contains one of
//! the catalog's self-harm phrases as a plain substring.  Matching is not
//! word-boundary aware: a false positive costs a safety message, a false
//! negative costs far more.

use crate::engine::normalize::normalize;

// ---------------------------------------------------------------------------
// CrisisDetector
// ---------------------------------------------------------------------------

/// Detects self-harm and suicide language.
///
/// # Example
/// ```rust
/// use mindbot_triage::catalog::Catalog;
/// use mindbot_triage::engine::CrisisDetector;
///
/// let detector = CrisisDetector::new(&Catalog::builtin().crisis_fragments);
/// assert!(detector.detect("I want to KILL MYSELF"));
/// assert!(!detector.detect("I killed it at work today"));
/// ```
pub struct CrisisDetector {
    fragments: Vec<String>,
}

impl CrisisDetector {
    /// Build a detector from raw phrases.
    ///
    /// Phrases are normalised the same way as input text, so `"self-harm"`
    /// becomes `"self harm"`.  Phrases that normalise to nothing are dropped.
    pub fn new(fragments: &[String]) -> Self {
        let fragments = fragments
            .iter()
            .map(|f| normalize(f))
            .filter(|f| !f.is_empty())
            .collect();
        Self { fragments }
    }

    /// `true` when the normalised form of `text` contains any crisis phrase.
    pub fn detect(&self, text: &str) -> bool {
        self.detect_normalized(&normalize(text))
    }

    /// Same as [`detect`](Self::detect) for text that is already normalised.
    pub fn detect_normalized(&self, normalized: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| normalized.contains(fragment.as_str()))
    }

    /// Number of active phrases.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` when no phrases survived normalisation.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn detector() -> CrisisDetector {
        CrisisDetector::new(&Catalog::builtin().crisis_fragments)
    }

    #[test]
    fn detects_direct_statements() {
        let d = detector();
        assert!(d.detect("I want to kill myself"));
        assert!(d.detect("thinking about suicide"));
        assert!(d.detect("I might hurt myself tonight"));
        assert!(d.detect("I just want to end my life."));
    }

    #[test]
    fn ignores_case_and_punctuation() {
        let d = detector();
        assert!(d.detect("KILL. MYSELF."));
        assert!(d.detect("Self-Harm"));
        assert!(d.detect("self   harm"));
    }

    #[test]
    fn substring_match_is_permissive() {
        let d = detector();
        // Not word-boundary aware.
        assert!(d.detect("antisuicidepolicy"));
    }

    #[test]
    fn unrelated_text_is_not_flagged() {
        let d = detector();
        assert!(!d.detect("I can't sleep"));
        assert!(!d.detect(""));
        assert!(!d.detect("!!!"));
    }

    #[test]
    fn blank_fragments_are_dropped() {
        let d = CrisisDetector::new(&["".to_string(), "--".to_string(), "help me".to_string()]);
        assert_eq!(d.len(), 1);
        assert!(!d.detect("anything at all"));
        assert!(d.detect("please help me"));
    }
}
