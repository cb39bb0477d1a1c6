//! Heading and title inference from font metadata.
//!
//! The pipeline is: build a [`FontSizeProfile`] from all spans, resolve the
//! title, then classify each span in document order. Explicit numbering
//! ("2.3.1 Scope") takes precedence over the size-derived level.

mod config;
mod extractor;
mod patterns;
mod profile;
mod title;

pub use config::OutlineConfig;
pub use extractor::OutlineExtractor;
pub use patterns::{is_meaningful_heading, HeadingPatterns};
pub use profile::FontSizeProfile;
pub use title::{is_valid_declared_title, resolve_title};
