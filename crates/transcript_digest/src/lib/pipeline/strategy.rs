/// One way of shrinking a span of text. The pipeline walks an ordered slice of
/// these and keeps the first that produces an acceptable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The generative summarizer.
    Abstractive,
    /// Salience-ranked sentence selection.
    Extractive,
    /// Character-budget cut with an ellipsis. Cannot fail.
    Truncate,
}

impl Strategy {
    /// Whole transcript within the single-call budget.
    pub const DIRECT: &'static [Strategy] = &[Strategy::Abstractive, Strategy::Extractive];
    /// A chunk within the single-call budget.
    pub const PER_CHUNK: &'static [Strategy] = &[Strategy::Abstractive, Strategy::Extractive];
    /// A chunk that is still too large for one generative call.
    pub const OVERSIZED_CHUNK: &'static [Strategy] = &[Strategy::Extractive];
    /// Compressing the concatenated chunk summaries.
    pub const REDUCE: &'static [Strategy] = &[
        Strategy::Abstractive,
        Strategy::Extractive,
        Strategy::Truncate,
    ];
}

/// Cuts `text` to at most `max_chars` characters, backing off to the last word
/// boundary when there is one, and marks the cut with `...`.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let prefix = text.chars().take(max_chars).collect::<String>();
    let cut = match prefix.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &prefix[..idx],
        _ => prefix.as_str(),
    };
    format!("{}...", cut.trim_end())
}
