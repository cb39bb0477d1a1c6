//! # pdf-outline
//!
//! Title and heading outline extraction from PDF documents.
//!
//! The library reads the styled text spans of a PDF (text, font size, font
//! name, page), profiles the font sizes used in the document and classifies
//! each span as a heading level (H1-H3) or body text. The result is a title
//! plus a flat outline, serializable to JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!
//!     println!("{}", result.title);
//!     for entry in &result.outline {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font-size profiling**: body size by frequency, up to three larger sizes as heading tiers
//! - **Numbering detection**: "2.3 Methods" is an H2 regardless of its size
//! - **Noise filtering**: dates and form labels are never headings
//! - **Pluggable span sources**: any [`SpanProvider`], or plain `Vec<TextSpan>` in tests
//! - **Batch processing**: one JSON file per PDF, in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, BatchOptions, BatchReport};
pub use detect::{detect_header_from_bytes, detect_header_from_path, is_pdf, PdfHeader};
pub use error::{Error, Result};
pub use model::{DocumentResult, HeadingLevel, OutlineEntry, SizeLevel, TextSpan, UNKNOWN_TITLE};
pub use outline::{FontSizeProfile, HeadingPatterns, OutlineConfig, OutlineExtractor};
pub use parser::{ErrorMode, ParseOptions, PdfSpanProvider, SpanProvider};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_file;
///
/// let result = extract_file("document.pdf").unwrap();
/// println!("{}: {} headings", result.title, result.outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    extract_file_with_config(path, &OutlineConfig::default())
}

/// Extract the title and outline of a PDF file with a custom configuration.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_file_with_config, OutlineConfig};
///
/// let config = OutlineConfig::default().with_ratio(1.25);
/// let result = extract_file_with_config("document.pdf", &config).unwrap();
/// ```
pub fn extract_file_with_config<P: AsRef<Path>>(
    path: P,
    config: &OutlineConfig,
) -> Result<DocumentResult> {
    config.validate()?;
    let provider = PdfSpanProvider::open(path)?;
    extract_with(&provider, &OutlineExtractor::with_config(config.clone()))
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentResult> {
    let provider = PdfSpanProvider::from_bytes(data)?;
    extract_with(&provider, &OutlineExtractor::new())
}

/// Extract the title and outline from spans already in memory.
///
/// Never fails; see [`OutlineExtractor::extract`].
///
/// # Example
///
/// ```
/// use pdf_outline::{extract_spans, TextSpan};
///
/// let spans = vec![
///     TextSpan::plain("Chapter 1: Intro", 24.0, 1),
///     TextSpan::plain("This is body text.", 12.0, 1),
///     TextSpan::plain("1.1 Background", 12.0, 1),
/// ];
/// let result = extract_spans(&spans, None);
/// assert_eq!(result.title, "Chapter 1: Intro");
/// assert_eq!(result.outline[0].text, "1.1 Background");
/// ```
pub fn extract_spans(spans: &[TextSpan], declared_title: Option<&str>) -> DocumentResult {
    OutlineExtractor::new().extract(spans, declared_title)
}

/// Run any span provider through an extractor.
pub fn extract_with<S: SpanProvider + ?Sized>(
    provider: &S,
    extractor: &OutlineExtractor,
) -> Result<DocumentResult> {
    let spans = provider.spans()?;
    let declared = provider.declared_title();
    Ok(extractor.extract(&spans, declared.as_deref()))
}
