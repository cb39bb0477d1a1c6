//! Data model for outline extraction.
//!
//! Spans flow in from a span provider, outlines flow out to the renderer.
//! Both sides are plain serde types so the extractor never sees a PDF
//! library object.

mod outline;
mod span;

pub use outline::{DocumentResult, HeadingLevel, OutlineEntry, SizeLevel, UNKNOWN_TITLE};
pub use span::TextSpan;
