//! Outline extraction from styled text spans.

use crate::model::{DocumentResult, HeadingLevel, OutlineEntry, TextSpan};

use super::patterns::{is_meaningful_heading, HeadingPatterns};
use super::profile::FontSizeProfile;
use super::title::resolve_title;
use super::OutlineConfig;

/// Heading and title extractor.
///
/// Stateless across documents: the font profile is rebuilt for every call,
/// so one extractor can be shared between threads.
///
/// # Example
///
/// ```
/// use pdf_outline::{OutlineExtractor, TextSpan};
///
/// let mut spans = vec![TextSpan::plain("Annual Report", 24.0, 1)];
/// spans.extend((0..5).map(|_| TextSpan::plain("Body text.", 11.0, 1)));
/// spans.push(TextSpan::plain("2.1 Financial Results", 11.0, 2));
///
/// let result = OutlineExtractor::new().extract(&spans, None);
/// assert_eq!(result.title, "Annual Report");
/// assert_eq!(result.outline.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    patterns: HeadingPatterns,
}

impl OutlineExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            config,
            patterns: HeadingPatterns::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Build the font size profile for a document.
    pub fn profile(&self, spans: &[TextSpan]) -> Option<FontSizeProfile> {
        FontSizeProfile::from_spans(spans, &self.config)
    }

    /// Extract the title and outline from spans in document order.
    ///
    /// Never fails. Documents without text yield the fallback title and an
    /// empty outline, regardless of the declared title.
    pub fn extract(&self, spans: &[TextSpan], declared_title: Option<&str>) -> DocumentResult {
        let Some(profile) = self.profile(spans) else {
            return DocumentResult::new(self.config.fallback_title.clone());
        };

        let title = resolve_title(spans, declared_title, &profile, &self.config);
        let mut result = DocumentResult::new(title);

        for span in spans.iter().filter(|s| !s.is_blank()) {
            if let Some(level) = self.classify(span, &profile) {
                result.push(OutlineEntry::new(level, span.trimmed(), span.page));
            }
        }

        log::debug!(
            "extracted {} headings, title {:?}",
            result.outline.len(),
            result.title
        );
        result
    }

    /// Heading level of a single span, or `None` if it is not a heading.
    ///
    /// Dates are skipped outright. Numbering decides the level when present;
    /// otherwise the size level applies, where only H1-H3 count. Either way
    /// the text must pass [`is_meaningful_heading`].
    pub fn classify(&self, span: &TextSpan, profile: &FontSizeProfile) -> Option<HeadingLevel> {
        let text = span.trimmed();
        if text.is_empty() || self.patterns.is_date_like(text) {
            return None;
        }

        let level = self
            .patterns
            .numbered_heading_level(text, self.config.min_numbered_text_len)
            .or_else(|| profile.level_of(span.font_size).heading())?;

        is_meaningful_heading(text, &self.patterns, &self.config).then_some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SizeLevel;

    fn body(count: usize, size: f32, page: u32) -> Vec<TextSpan> {
        (0..count)
            .map(|_| TextSpan::plain("This is body text.", size, page))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let result = OutlineExtractor::new().extract(&[], None);
        assert_eq!(result, DocumentResult::unknown());
    }

    #[test]
    fn test_blank_spans_only() {
        let spans = vec![TextSpan::plain("   ", 12.0, 1), TextSpan::plain("", 30.0, 1)];
        let result = OutlineExtractor::new().extract(&spans, Some("Annual Report 2024"));
        assert_eq!(result.title, "Unknown Title");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_numbering_beats_body_size() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("2.3 Methodology", 10.0, 1));
        spans.push(TextSpan::plain("2.3 ok", 10.0, 1));

        let result = OutlineExtractor::new().extract(&spans, None);
        assert_eq!(
            result.outline,
            vec![OutlineEntry::new(HeadingLevel::H2, "2.3 Methodology", 1)]
        );
    }

    #[test]
    fn test_list_item_falls_back_to_size_level() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Main Title", 30.0, 1));
        spans.push(TextSpan::plain("3. Goal list", 20.0, 1));
        spans.push(TextSpan::plain("4) abc", 20.0, 1));

        let result = OutlineExtractor::new().extract(&spans, None);
        // "4) abc" is a list item by numbering but sits at the H1 size
        assert_eq!(
            result.outline,
            vec![
                OutlineEntry::new(HeadingLevel::H1, "3. Goal list", 1),
                OutlineEntry::new(HeadingLevel::H1, "4) abc", 1),
            ]
        );
    }

    #[test]
    fn test_date_is_never_a_heading() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Cover Title", 30.0, 1));
        spans.push(TextSpan::plain("15 March 2024", 20.0, 1));
        spans.push(TextSpan::plain("15 March 2024", 30.0, 2));

        let result = OutlineExtractor::new().extract(&spans, None);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_skip_list_at_title_size() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Signature", 30.0, 2));
        spans.push(TextSpan::plain("Signature", 20.0, 2));

        let result = OutlineExtractor::new().extract(&spans, None);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_title_level_spans_are_not_headings() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Big Cover Line", 30.0, 1));
        spans.push(TextSpan::plain("Chapter Heading", 20.0, 2));

        let result = OutlineExtractor::new().extract(&spans, None);
        assert_eq!(result.title, "Big Cover Line");
        assert_eq!(
            result.outline,
            vec![OutlineEntry::new(HeadingLevel::H1, "Chapter Heading", 2)]
        );
    }

    #[test]
    fn test_size_levels_h1_h2() {
        let mut spans = body(20, 10.0, 1);
        spans.insert(0, TextSpan::plain("Cover Title", 32.0, 1));
        spans.push(TextSpan::plain("Background", 20.0, 1));
        spans.push(TextSpan::plain("Technical Overview", 16.0, 2));
        spans.push(TextSpan::plain("Slightly bigger text", 11.0, 2));

        let extractor = OutlineExtractor::new();
        let profile = extractor.profile(&spans).unwrap();
        assert_eq!(profile.level_of(16.0), SizeLevel::H2);

        let result = extractor.extract(&spans, None);
        assert_eq!(
            result.outline,
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Background", 1),
                OutlineEntry::new(HeadingLevel::H2, "Technical Overview", 2),
            ]
        );
    }

    #[test]
    fn test_outline_text_is_trimmed() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("  1 Introduction  ", 10.0, 3));

        let result = OutlineExtractor::new().extract(&spans, None);
        assert_eq!(result.outline[0].text, "1 Introduction");
        assert_eq!(result.outline[0].page, 3);
    }

    #[test]
    fn test_custom_ratio() {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Cover Title", 30.0, 1));
        spans.push(TextSpan::plain("Subsection Heading", 11.2, 1));

        let default_result = OutlineExtractor::new().extract(&spans, None);
        assert!(default_result.outline.is_empty());

        let relaxed = OutlineExtractor::with_config(OutlineConfig::default().with_ratio(1.1));
        let result = relaxed.extract(&spans, None);
        assert_eq!(
            result.outline,
            vec![OutlineEntry::new(HeadingLevel::H1, "Subsection Heading", 1)]
        );
    }
}
