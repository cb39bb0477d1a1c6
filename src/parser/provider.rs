//! Span providers: sources of styled text spans for the outline extractor.

use std::io::Read;
use std::path::Path;

use crate::detect::detect_header_from_path;
use crate::error::{Error, Result};
use crate::model::TextSpan;

use super::backend::{LopdfBackend, PdfBackend};
use super::options::{ErrorMode, ParseOptions};
use super::spans::collect_page_spans;

/// A source of text spans in document order plus an optional declared title.
pub trait SpanProvider {
    /// Title declared in the document metadata, if any.
    fn declared_title(&self) -> Option<String>;

    /// All text spans, ordered by page and then by position within the page.
    fn spans(&self) -> Result<Vec<TextSpan>>;
}

/// Spans already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpans {
    pub title: Option<String>,
    pub spans: Vec<TextSpan>,
}

impl InMemorySpans {
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { title: None, spans }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl SpanProvider for InMemorySpans {
    fn declared_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn spans(&self) -> Result<Vec<TextSpan>> {
        Ok(self.spans.clone())
    }
}

/// Span provider reading PDF documents.
pub struct PdfSpanProvider<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfSpanProvider<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject non-PDF input before handing it to lopdf
        detect_header_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        log::debug!("opened {} (PDF {})", path.display(), backend.version());
        Self::checked(backend, options)
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        crate::detect::detect_header_from_bytes(data)?;
        Self::checked(LopdfBackend::load_bytes(data)?, options)
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn checked(mut backend: LopdfBackend, options: ParseOptions) -> Result<Self> {
        // Permission-only encryption opens with the empty user password
        if backend.is_encrypted() {
            backend.decrypt_empty_password()?;
            log::debug!("decrypted with the empty user password");
        }
        Ok(Self { backend, options })
    }
}

impl SpanProvider for Vec<TextSpan> {
    fn declared_title(&self) -> Option<String> {
        None
    }

    fn spans(&self) -> Result<Vec<TextSpan>> {
        Ok(self.clone())
    }
}

impl<B: PdfBackend> PdfSpanProvider<B> {
    /// Wrap an existing backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Spans of a single page (1-based).
    pub fn page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        collect_page_spans(&self.backend, page_num, *page_id, &self.options)
    }

    /// Parse options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl<B: PdfBackend> SpanProvider for PdfSpanProvider<B> {
    fn declared_title(&self) -> Option<String> {
        self.backend
            .info_title()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn spans(&self) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::new();

        for (page_num, page_id) in self.backend.pages() {
            match collect_page_spans(&self.backend, page_num, page_id, &self.options) {
                Ok(page_spans) => spans.extend(page_spans),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::TextExtract(format!("Page {}: {}", page_num, e)));
                    }
                    log::warn!("Failed to extract spans from page {}: {}", page_num, e);
                }
            }
        }

        Ok(spans)
    }
}
