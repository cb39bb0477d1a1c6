//! Outline extraction configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::UNKNOWN_TITLE;

/// Form and table vocabulary that disqualifies a heading candidate.
const DEFAULT_SKIP_KEYWORDS: &[&str] = &[
    "s.no",
    "name",
    "age",
    "date",
    "signature",
    "amount",
    "rs",
    "pay",
    "designation",
    "service",
    "persons",
    "relationship",
    "declaration",
    "undertake",
    "application",
    "form",
    "date of entering",
    "home town",
];

/// Terms marking a metadata title as a generator placeholder.
const DEFAULT_PLACEHOLDER_TERMS: &[&str] = &["microsoft word", "untitled", "doc", "pdf"];

/// File-extension suffixes that mark a metadata title as a file name.
const DEFAULT_TITLE_SUFFIXES: &[&str] = &[".doc", ".docx", ".pdf"];

/// Tunable constants for heading and title detection.
///
/// Every field has a default matching the behavior tuned on forms and
/// reports in Latin script; missing fields in a JSON config fall back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// A size is a heading candidate when `size >= body_size * ratio`
    pub heading_size_ratio: f64,

    /// How many of the largest candidate sizes get a level (Title, H1, H2, H3)
    pub max_heading_sizes: usize,

    /// Minimum trimmed length of an outline heading
    pub min_heading_len: usize,

    /// Minimum length of the text after a numbering prefix ("2.3 ok" is a list item)
    pub min_numbered_text_len: usize,

    /// Case-insensitive substrings that reject a heading
    pub skip_keywords: Vec<String>,

    /// Minimum length of a declared metadata title
    pub min_title_len: usize,

    /// Case-insensitive substrings that reject a declared title
    pub placeholder_terms: Vec<String>,

    /// Case-insensitive suffixes that reject a declared title
    pub invalid_title_suffixes: Vec<String>,

    /// Title used when nothing better is found
    pub fallback_title: String,
}

impl OutlineConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the heading size ratio.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set the number of heading sizes (clamped to 1..=4).
    pub fn with_max_heading_sizes(mut self, count: usize) -> Self {
        self.max_heading_sizes = count.clamp(1, 4);
        self
    }

    /// Replace the skip-list.
    pub fn with_skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Add a keyword to the skip-list.
    pub fn add_skip_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.skip_keywords.push(keyword.into());
        self
    }

    /// Replace the declared-title placeholder terms.
    pub fn with_placeholder_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.placeholder_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Check the config for values the extractor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.heading_size_ratio.is_finite() || self.heading_size_ratio <= 0.0 {
            return Err(Error::Config(format!(
                "heading_size_ratio must be a positive number, got {}",
                self.heading_size_ratio
            )));
        }
        if !(1..=4).contains(&self.max_heading_sizes) {
            return Err(Error::Config(format!(
                "max_heading_sizes must be between 1 and 4, got {}",
                self.max_heading_sizes
            )));
        }
        if self.fallback_title.trim().is_empty() {
            return Err(Error::Config("fallback_title must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            heading_size_ratio: 1.15,
            max_heading_sizes: 3,
            min_heading_len: 5,
            min_numbered_text_len: 4,
            skip_keywords: to_strings(DEFAULT_SKIP_KEYWORDS),
            min_title_len: 5,
            placeholder_terms: to_strings(DEFAULT_PLACEHOLDER_TERMS),
            invalid_title_suffixes: to_strings(DEFAULT_TITLE_SUFFIXES),
            fallback_title: UNKNOWN_TITLE.to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
