use std::collections::HashSet;
use std::sync::LazyLock;

/// High-frequency English function words.
const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "is", "of", "to", "in", "that", "it", "you", "this", "was", "for", "are",
    "with", "we", "be", "have", "not", "they", "at", "but", "what", "there", "which", "would",
];

static MARKERS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_MARKERS.iter().copied().collect());

/// Blocks transcripts that do not read as English. A gate only: nothing is
/// detected or translated beyond the yes/no answer.
#[derive(Debug, Clone, Copy)]
pub struct LanguageGate {
    min_ratio: f64,
}

impl Default for LanguageGate {
    fn default() -> Self {
        Self { min_ratio: 0.05 }
    }
}

impl LanguageGate {
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }

    pub fn marker_ratio(text: &str) -> f64 {
        let mut total = 0usize;
        let mut hits = 0usize;
        for word in text.split_whitespace() {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.is_empty() {
                continue;
            }
            total += 1;
            if MARKERS.contains(word.as_str()) {
                hits += 1;
            }
        }

        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }

    pub fn is_english(&self, text: &str) -> bool {
        Self::marker_ratio(text) >= self.min_ratio
    }
}
