//! Batch driver: one JSON outline per PDF in a directory.
//!
//! Every `*.pdf` file (any case) directly inside the input directory is run
//! through [`PdfSpanProvider`] and [`OutlineExtractor`], and the result is
//! written to `<stem>.json` in the output directory. A file that fails is
//! logged and recorded in the [`BatchReport`]; the rest of the batch goes on.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::outline::{OutlineConfig, OutlineExtractor};
use crate::parser::{ParseOptions, PdfSpanProvider, SpanProvider};
use crate::render::{write_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process files on the rayon thread pool
    pub parallel: bool,

    /// JSON layout of the output files
    pub format: JsonFormat,

    /// Span extraction options
    pub parse: ParseOptions,

    /// Heading detection tuning
    pub outline: OutlineConfig,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set span extraction options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the outline configuration.
    pub fn with_outline_config(mut self, outline: OutlineConfig) -> Self {
        self.outline = outline;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
            parse: ParseOptions::default().lenient(),
            outline: OutlineConfig::default(),
        }
    }
}

/// Outcome of one input file.
#[derive(Debug)]
pub struct BatchItem {
    pub input: PathBuf,
    /// Output path on success, error message on failure
    pub outcome: std::result::Result<PathBuf, String>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Summary of a batch run, in input file name order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Number of inputs seen.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of files written.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }

    /// Inputs that failed, with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            Ok(_) => None,
            Err(msg) => Some((item.input.as_path(), msg.as_str())),
        })
    }

    /// Paths of the JSON files written.
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.as_ref().ok().map(PathBuf::as_path))
    }
}

/// PDF files directly inside `input_dir`, sorted by path.
pub fn collect_inputs<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(Error::Other(format!(
            "Input directory not found: {}",
            input_dir.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Output path for an input: its extension replaced with `.json`, inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Extract and write the outline of a single file.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    extractor: &OutlineExtractor,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let provider = PdfSpanProvider::open_with_options(input, options.parse.clone())?;
    let spans = provider.spans()?;
    let declared = provider.declared_title();
    let result = extractor.extract(&spans, declared.as_deref());

    let output = output_path_for(input, output_dir);
    let mut writer = BufWriter::new(File::create(&output)?);
    write_json(&mut writer, &result, options.format)?;
    writer.flush()?;

    log::info!(
        "{} -> {} ({} headings)",
        input.display(),
        output.display(),
        result.outline.len()
    );
    Ok(output)
}

/// Process every PDF in `input_dir`, writing JSON files to `output_dir`.
///
/// The output directory is created if missing. Only directory-level
/// problems are errors; per-file failures land in the report.
pub fn run_batch<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    run_batch_with_progress(input_dir, output_dir, options, |_| {})
}

/// [`run_batch`] with a callback invoked after each file.
///
/// The callback may run on several threads at once when `parallel` is set.
pub fn run_batch_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_item: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&BatchItem) + Sync,
{
    let inputs = collect_inputs(input_dir)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    options.outline.validate()?;

    log::info!(
        "processing {} files into {}",
        inputs.len(),
        output_dir.display()
    );

    let extractor = OutlineExtractor::with_config(options.outline.clone());
    let run = |input: &PathBuf| {
        let outcome = process_file(input, output_dir, &extractor, options).map_err(|e| {
            log::warn!("Skipping {}: {}", input.display(), e);
            e.to_string()
        });
        let item = BatchItem {
            input: input.clone(),
            outcome,
        };
        on_item(&item);
        item
    };

    // par_iter().map().collect() keeps input order
    let items: Vec<BatchItem> = if options.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    };

    Ok(BatchReport { items })
}

/// Async wrapper around [`run_batch`], run on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn run_batch_async(
    input_dir: PathBuf,
    output_dir: PathBuf,
    options: BatchOptions,
) -> Result<BatchReport> {
    tokio::task::spawn_blocking(move || run_batch(&input_dir, &output_dir, &options))
        .await
        .map_err(|e| Error::Other(format!("Batch task failed: {}", e)))?
}
