//! Span extraction options.

/// Options for reading text spans from PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Apply Unicode NFKC normalization to span text (ligatures, full-width forms)
    pub normalize_text: bool,

    /// Merge consecutive text operators sharing font, size and baseline
    pub merge_spans: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (fail the document on the first unreadable page).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Enable or disable span merging.
    pub fn with_merge_spans(mut self, merge: bool) -> Self {
        self.merge_spans = merge;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            normalize_text: true,
            merge_spans: true,
        }
    }
}

/// Error handling mode during span extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .with_normalize_text(false)
            .with_merge_spans(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.normalize_text);
        assert!(!options.merge_spans);
        assert_eq!(options.strict().error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.normalize_text);
        assert!(options.merge_spans);
    }
}
