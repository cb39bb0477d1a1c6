//! Text span collection from page content streams.
//!
//! Interprets the text-state and text-showing operators of a page and
//! produces one [`TextSpan`] per run of text sharing a font, size and
//! baseline.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::TextSpan;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use super::options::ParseOptions;

/// TJ adjustment (thousandths of an em) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline tolerance in user-space units for merging spans.
const BASELINE_TOLERANCE: f32 = 0.5;

/// Estimated glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH_EMS: f32 = 0.5;

/// Horizontal jump, in ems past the estimated end of a run, that starts a
/// new span on the same baseline (next column, table cell or form field).
const COLUMN_GAP_EMS: f32 = 3.0;

/// Collect the text spans of one page in content-stream order.
pub fn collect_page_spans<B: PdfBackend + ?Sized>(
    backend: &B,
    page_num: u32,
    page_id: PageId,
    options: &ParseOptions,
) -> Result<Vec<TextSpan>> {
    let fonts: HashMap<Vec<u8>, String> = backend
        .page_fonts(page_id)?
        .into_iter()
        .map(|f| (f.name, f.base_font))
        .collect();

    let content = backend.page_content(page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let ops = backend.decode_content(&content)?;
    let decoder = backend.text_decoder(page_id);

    let mut collector = SpanCollector::new(page_num, options);
    for op in &ops {
        collector.apply(op, &fonts, |font, bytes| decoder.decode(font, bytes));
    }
    Ok(collector.finish())
}

/// 2D affine matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: &ContentOp) -> Option<Self> {
        Some(Self {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    /// `self × other`, applying `self` first.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn translated(&self, tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: self.e + tx * self.a + ty * self.c,
            f: self.f + tx * self.b + ty * self.d,
            ..*self
        }
    }

    /// Length of the transformed unit y vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Span under construction.
#[derive(Debug)]
struct PendingSpan {
    text: String,
    font_name: String,
    font_size: f32,
    baseline: f32,
    /// Estimated x where the text shown so far ends
    end_x: f32,
}

/// Content-stream interpreter state for one page.
struct SpanCollector<'a> {
    page: u32,
    options: &'a ParseOptions,
    spans: Vec<TextSpan>,
    pending: Option<PendingSpan>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    /// A positioning operator ran since the last text was shown
    moved: bool,
}

impl<'a> SpanCollector<'a> {
    fn new(page: u32, options: &'a ParseOptions) -> Self {
        Self {
            page,
            options,
            spans: Vec::new(),
            pending: None,
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            moved: false,
        }
    }

    fn apply<D>(&mut self, op: &ContentOp, fonts: &HashMap<Vec<u8>, String>, decode: D)
    where
        D: Fn(&[u8], &[u8]) -> String,
    {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.ctm_stack.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.flush(),
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.font_name = fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    self.font_resource = name.clone();
                }
                if let Some(size) = op.number(1) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.leading = leading;
                }
            }
            "Td" => self.move_line(op.number(0), op.number(1)),
            "TD" => {
                if let Some(ty) = op.number(1) {
                    self.leading = -ty;
                }
                self.move_line(op.number(0), op.number(1));
            }
            "Tm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                    self.moved = true;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(&self.font_resource, bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_tj(items, &decode);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(&self.font_resource, bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = decode(&self.font_resource, bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: Option<f32>, ty: Option<f32>) {
        let (Some(tx), Some(ty)) = (tx, ty) else {
            return;
        };
        self.line_matrix = self.line_matrix.translated(tx, ty);
        self.text_matrix = self.line_matrix;
        self.moved = true;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 { self.leading } else { self.font_size };
        self.move_line(Some(0.0), Some(-leading));
    }

    /// Join the strings of a TJ array, turning large kerning gaps into spaces.
    fn decode_tj<D>(&self, items: &[PdfValue], decode: &D) -> String
    where
        D: Fn(&[u8], &[u8]) -> String,
    {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&decode(&self.font_resource, bytes)),
                other => {
                    // Negative adjustments move the next glyph to the right
                    let adjustment = other.as_number().map_or(0.0, |n| -n);
                    if adjustment > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        if text.is_empty() {
            return;
        }

        let device = self.text_matrix.then(&self.ctm);
        let font_size = round_size(self.font_size.abs() * device.vertical_scale());
        let baseline = device.f;
        let x = device.e;
        let advance = estimated_width(&text, font_size);
        let moved = std::mem::take(&mut self.moved);

        if self.options.merge_spans {
            if let Some(pending) = self.pending.as_mut() {
                let same_run = pending.font_name == self.font_name
                    && pending.font_size == font_size
                    && (pending.baseline - baseline).abs() <= BASELINE_TOLERANCE
                    && !(moved && x - pending.end_x > font_size * COLUMN_GAP_EMS);

                if same_run {
                    if moved {
                        if needs_space_after(&pending.text) && !starts_with_space(&text) {
                            pending.text.push(' ');
                        }
                        pending.end_x = x + advance;
                    } else {
                        pending.end_x += advance;
                    }
                    pending.text.push_str(&text);
                    return;
                }
            }
        }

        self.flush();
        self.pending = Some(PendingSpan {
            text,
            font_name: self.font_name.clone(),
            font_size,
            baseline,
            end_x: x + advance,
        });
    }

    fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let text = if self.options.normalize_text {
            pending.text.nfkc().collect::<String>()
        } else {
            pending.text
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.spans.push(TextSpan::new(
            text,
            pending.font_size,
            pending.font_name,
            self.page,
        ));
    }

    fn finish(mut self) -> Vec<TextSpan> {
        self.flush();
        self.spans
    }
}

/// Round an effective font size to 0.01pt so matrix arithmetic noise does
/// not split one size into several.
fn round_size(size: f32) -> f32 {
    (size * 100.0).round() / 100.0
}

/// Rough advance of `text`; glyph widths are not read from the font.
fn estimated_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH_EMS
}

fn starts_with_space(text: &str) -> bool {
    text.starts_with(' ') || text.starts_with('\u{00A0}')
}

/// A word gap needs a space unless the text is empty, already ends with
/// one, or ends in a script written without spaces.
fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => c != ' ' && c != '\u{00A0}' && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // CJK Unified Ideographs Extension B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
