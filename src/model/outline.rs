//! Outline-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when neither metadata nor page content yields one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Heading level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Heading level for a numbering depth (1 = "2", 2 = "2.3", ...), capped at H3.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label as written in the JSON output ("H1", "H2", "H3").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level assigned to a font size by the font-size profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeLevel {
    Title,
    H1,
    H2,
    H3,
    Body,
}

impl SizeLevel {
    /// Level for the n-th largest heading size (0 = Title).
    pub(crate) fn from_rank(rank: usize) -> Self {
        match rank {
            0 => SizeLevel::Title,
            1 => SizeLevel::H1,
            2 => SizeLevel::H2,
            3 => SizeLevel::H3,
            _ => SizeLevel::Body,
        }
    }

    /// The outline heading level, if this size level is eligible as one.
    ///
    /// Title and Body are never outline headings.
    pub fn heading(self) -> Option<HeadingLevel> {
        match self {
            SizeLevel::H1 => Some(HeadingLevel::H1),
            SizeLevel::H2 => Some(HeadingLevel::H2),
            SizeLevel::H3 => Some(HeadingLevel::H3),
            SizeLevel::Title | SizeLevel::Body => None,
        }
    }
}

impl fmt::Display for SizeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SizeLevel::Title => "Title",
            SizeLevel::H1 => "H1",
            SizeLevel::H2 => "H2",
            SizeLevel::H3 => "H3",
            SizeLevel::Body => "Body",
        };
        f.write_str(label)
    }
}

/// A single detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text (trimmed)
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Extraction result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document title, never empty
    pub title: String,

    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentResult {
    /// Create a result with a title and no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// The degenerate result for documents without text.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_TITLE)
    }

    /// Append a heading.
    pub fn push(&mut self, entry: OutlineEntry) {
        self.outline.push(entry);
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of headings at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

impl Default for DocumentResult {
    fn default() -> Self {
        Self::unknown()
    }
}
