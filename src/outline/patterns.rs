//! Text predicates used to classify heading candidates.

use regex::Regex;

use crate::model::HeadingLevel;

use super::OutlineConfig;

/// Compiled patterns for date and numbering detection.
///
/// Build once and reuse across documents; matching takes `&self`.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    date_regex: Regex,
    numbering_regex: Regex,
    noise_regex: Regex,
}

impl HeadingPatterns {
    /// Compile the patterns.
    pub fn new() -> Self {
        Self {
            date_regex: Regex::new(
                r"(?i)^\d{1,2}\s+(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC|JANUARY|FEBRUARY|MARCH|APRIL|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER)\s+\d{4}$",
            )
            .unwrap(),
            numbering_regex: Regex::new(r"^(\d+(?:\.\d+)*)[.)]?\s+(.*)$").unwrap(),
            noise_regex: Regex::new(r"^[\d\s.\-(),:;]+$").unwrap(),
        }
    }

    /// Check for a full-string date such as "15 March 2024" or "3 SEP 2019".
    pub fn is_date_like(&self, text: &str) -> bool {
        self.date_regex.is_match(text.trim())
    }

    /// Heading level implied by a numbering prefix.
    ///
    /// "2.3.1 Scope" has three numbering groups and yields H3; deeper
    /// numbering is capped at H3. Returns `None` when there is no numbering
    /// prefix, or when the text after it is shorter than
    /// `min_text_len` characters (a list item such as "2. ok").
    pub fn numbered_heading_level(&self, text: &str, min_text_len: usize) -> Option<HeadingLevel> {
        let caps = self.numbering_regex.captures(text.trim())?;
        let numbering = caps.get(1)?.as_str();
        let rest = caps.get(2).map_or("", |m| m.as_str());

        if rest.trim().chars().count() < min_text_len {
            return None;
        }

        let depth = numbering.matches('.').count() + 1;
        Some(HeadingLevel::from_depth(depth))
    }

    /// Check if the text is only digits, whitespace and list punctuation.
    pub fn is_numbering_noise(&self, text: &str) -> bool {
        self.noise_regex.is_match(text.trim())
    }
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide whether a heading candidate is a real structural heading.
///
/// Rejects short text, pure numbering or punctuation ("1.", "(2)", "..."),
/// and anything containing a skip-list keyword (form labels such as "Name"
/// or "Signature").
pub fn is_meaningful_heading(
    text: &str,
    patterns: &HeadingPatterns,
    config: &OutlineConfig,
) -> bool {
    let text = text.trim();
    if text.chars().count() < config.min_heading_len {
        return false;
    }
    if patterns.is_numbering_noise(text) {
        return false;
    }

    let lower = text.to_lowercase();
    !config
        .skip_keywords
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}
