//! PDF span extraction module.

mod backend;
mod options;
mod provider;
mod spans;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    SimpleTextDecoder, TextDecoder,
};
pub use options::{ErrorMode, ParseOptions};
pub use provider::{InMemorySpans, PdfSpanProvider, SpanProvider};
pub use spans::collect_page_spans;
