//! Styled text span type.

use serde::{Deserialize, Serialize};

/// A trimmed run of text sharing one font and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
}

impl TextSpan {
    /// Create a new text span, deriving boldness from the font name.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        page: u32,
    ) -> Self {
        let font_name = font_name.into();
        let is_bold = is_bold_font(&font_name);

        Self {
            text: text.into(),
            font_size,
            font_name,
            is_bold,
            page,
        }
    }

    /// Create a span with a plain font name, for synthetic input.
    pub fn plain(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self::new(text, font_size, "Helvetica", page)
    }

    /// Override the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.is_bold = bold;
        self
    }

    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the span carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Bold detection from a font name ("Arial-BoldMT", "Helvetica-Black", ...).
pub(crate) fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}
