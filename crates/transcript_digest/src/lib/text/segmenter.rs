use unicode_segmentation::UnicodeSegmentation;

use crate::error::CapabilityError;

pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, CapabilityError>;
}

impl<T: SentenceSegmenter + ?Sized> SentenceSegmenter for Box<T> {
    fn segment(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        (**self).segment(text)
    }
}

/// Language-aware boundaries from the Unicode sentence rules (UAX #29).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        let sentences = text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        if sentences.is_empty() && !text.trim().is_empty() {
            return Err(CapabilityError::Segmenter(
                "no sentence boundaries found in non-empty text".into(),
            ));
        }
        Ok(sentences)
    }
}

/// Splits on the literal `". "` and puts the period back on every fragment
/// except the last, which keeps whatever ending it had.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSegmenter;

impl SentenceSegmenter for NaiveSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        let fragments = text.split(". ").collect::<Vec<_>>();
        let last = fragments.len().saturating_sub(1);

        Ok(fragments
            .into_iter()
            .enumerate()
            .filter_map(|(idx, fragment)| {
                let fragment = fragment.trim();
                if fragment.is_empty() {
                    None
                } else if idx < last {
                    Some(format!("{fragment}."))
                } else {
                    Some(fragment.to_string())
                }
            })
            .collect())
    }
}

/// Never fails: a failing segmenter falls back to [`NaiveSegmenter`], and if that
/// finds nothing either the whole text is one sentence.
pub fn segment_sentences<G: SentenceSegmenter + ?Sized>(segmenter: &G, text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let sentences = segmenter.segment(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Sentence segmenter failed, splitting on periods");
        NaiveSegmenter.segment(text).unwrap_or_default()
    });

    if sentences.is_empty() {
        return vec![text.to_string()];
    }
    sentences
}
