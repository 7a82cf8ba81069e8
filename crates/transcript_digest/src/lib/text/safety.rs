use std::path::Path;

use crate::error::ConfigError;

/// Advisory returned in place of a summary when the gate trips.
pub const SAFETY_ADVISORY: &str =
    "This video may contain content that is not suitable for all audiences, so no summary was generated.";

/// Sensitive-topic terms used when no keyword file is configured.
///
/// Matching is by substring, so short entries also hit longer benign words
/// ("gun" in "begun"). A false positive only blocks a summary.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "violence",
    "violent",
    "weapon",
    "gun",
    "shoot",
    "kill",
    "murder",
    "blood",
    "bomb",
    "explosion",
    "explosive",
    "terror",
    "suicide",
    "drugs",
    "cocaine",
    "heroin",
    "sex",
    "nude",
    "porn",
    "rape",
    "abuse",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Safe,
    Unsafe { keyword: String },
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }
}

/// Case-insensitive keyword gate. Deterministic and inspectable: the verdict
/// names the keyword that tripped it.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    keywords: Vec<String>,
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl SafetyFilter {
    pub fn new<I, K>(keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Reads one keyword per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::KeywordFile {
            path: path.to_path_buf(),
            source,
        })?;

        let filter = Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        tracing::debug!(path = %path.display(), keywords = filter.keywords.len(), "Loaded safety keywords");
        Ok(filter)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the first configured keyword found in `text`, in list order.
    pub fn check(&self, text: &str) -> SafetyVerdict {
        if text.is_empty() {
            return SafetyVerdict::Safe;
        }

        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| haystack.contains(keyword.as_str()))
            .map_or(SafetyVerdict::Safe, |keyword| SafetyVerdict::Unsafe {
                keyword: keyword.clone(),
            })
    }
}
