//! pdf-outline CLI - title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{collect_inputs, run_batch_with_progress};
use pdf_outline::render::to_json;
use pdf_outline::{
    detect_header_from_path, extract_with, BatchOptions, HeadingLevel, JsonFormat,
    OutlineConfig, OutlineExtractor, ParseOptions, PdfSpanProvider, SpanProvider,
};

const DEFAULT_INPUT_DIR: &str = "/app/input";
const DEFAULT_OUTPUT_DIR: &str = "/app/output";

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract titles and heading outlines from PDF files as JSON", long_about = None)]
struct Cli {
    /// Input directory of PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT")]
    input: Option<PathBuf>,

    /// Output directory for JSON files
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT")]
    output: Option<PathBuf>,

    /// Outline configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum heading size relative to the body size
    #[arg(long, global = true, value_name = "RATIO")]
    ratio: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract outlines of every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show font profile diagnostics for a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref(), cli.ratio).and_then(|config| {
        match cli.command {
            Some(Commands::Extract {
                input,
                output,
                compact,
            }) => cmd_extract(&input, output.as_deref(), compact, config),
            Some(Commands::Batch {
                input,
                output,
                sequential,
                compact,
            }) => cmd_batch(&input, &output, !sequential, compact, config),
            Some(Commands::Info { input }) => cmd_info(&input, config),
            Some(Commands::Version) => {
                cmd_version();
                Ok(())
            }
            None => {
                // Default behavior: batch the container directories
                let input = cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
                let output = cli
                    .output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
                cmd_batch(&input, &output, true, false, config)
            }
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Outline configuration from an optional JSON file plus flag overrides.
fn load_config(
    path: Option<&Path>,
    ratio: Option<f64>,
) -> Result<OutlineConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => {
            log::debug!("loading outline config from {}", path.display());
            OutlineConfig::from_json(&fs::read_to_string(path)?)?
        }
        None => OutlineConfig::default(),
    };

    if let Some(ratio) = ratio {
        config = config.with_ratio(ratio);
    }

    config.validate()?;
    Ok(config)
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    config: OutlineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Use lenient mode so one damaged page does not lose the whole outline
    let provider = PdfSpanProvider::open_with_options(input, ParseOptions::new().lenient())?;
    let result = extract_with(&provider, &OutlineExtractor::with_config(config))?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    parallel: bool,
    compact: bool,
    config: OutlineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = collect_inputs(input)?.len();
    fs::create_dir_all(output)?;
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input.display()
        );
        return Ok(());
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let options = BatchOptions::new()
        .with_parallel(parallel)
        .with_format(format)
        .with_outline_config(config);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = run_batch_with_progress(input, output, &options, |item| {
        let name = item
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!(
        "\n{} {}/{} files -> {}",
        "Processed".green().bold(),
        report.succeeded(),
        report.total(),
        output.display()
    );

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("{}", "Skipped:".yellow().bold());
        for (i, (path, error)) in failures.iter().enumerate() {
            let branch = if i + 1 == failures.len() { "└─" } else { "├─" };
            println!("  {} {}: {}", branch.dimmed(), path.display(), error.red());
        }
    }

    Ok(())
}

fn cmd_info(input: &Path, config: OutlineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let header = detect_header_from_path(input)?;
    let provider = PdfSpanProvider::open_with_options(input, ParseOptions::new().lenient())?;
    let spans = provider.spans()?;
    let declared = provider.declared_title();

    let extractor = OutlineExtractor::with_config(config);
    let result = extractor.extract(&spans, declared.as_deref());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), header);
    println!("{}: {}", "Pages".bold(), provider.page_count());
    println!(
        "{}: {}",
        "Declared title".bold(),
        declared.as_deref().unwrap_or("(none)")
    );
    println!("{}: {}", "Resolved title".bold(), result.title);

    println!();
    println!("{}", "Font Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Spans".bold(), spans.len());
    match extractor.profile(&spans) {
        Some(profile) => {
            println!(
                "{}: {}pt ({} spans)",
                "Body size".bold(),
                profile.body_size,
                profile.frequency(profile.body_size)
            );
            for size in &profile.heading_sizes {
                println!(
                    "  {} {:>6}pt  {:?} ({} spans)",
                    "•".dimmed(),
                    size,
                    profile.level_of(*size),
                    profile.frequency(*size)
                );
            }
        }
        None => println!("{}", "No text found".yellow()),
    }

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        println!("{}: {}", level.as_str().bold(), result.count_level(level));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/pdf-outline".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config.heading_size_ratio, 1.15);
    }

    #[test]
    fn test_load_config_file_and_ratio_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.json");
        let json = serde_json::json!({
            "heading_size_ratio": 1.4,
            "skip_keywords": ["appendix"],
        });
        fs::write(&path, json.to_string()).unwrap();

        let config = load_config(Some(path.as_path()), None).unwrap();
        assert_eq!(config.heading_size_ratio, 1.4);
        assert_eq!(config.skip_keywords, vec!["appendix".to_string()]);

        let config = load_config(Some(path.as_path()), Some(1.2)).unwrap();
        assert_eq!(config.heading_size_ratio, 1.2);
    }

    #[test]
    fn test_load_config_rejects_bad_ratio() {
        assert!(load_config(None, Some(0.0)).is_err());
    }

    #[test]
    fn test_batch_without_pdfs_creates_output_dir() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("readme.txt"), "not a pdf").unwrap();
        let output = tempfile::tempdir().unwrap();
        let output_dir = output.path().join("json");

        cmd_batch(input.path(), &output_dir, true, false, OutlineConfig::default()).unwrap();
        assert!(output_dir.is_dir());
        assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_batch_missing_input_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_batch(
            &dir.path().join("absent"),
            &dir.path().join("out"),
            true,
            false,
            OutlineConfig::default(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_cli_parses_default_dirs() {
        let cli = Cli::parse_from(["pdf-outline", "in", "out", "--ratio", "1.3"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("in")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.ratio, Some(1.3));
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::parse_from(["pdf-outline", "batch", "a", "b", "--sequential"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Batch { sequential: true, compact: false, .. })
        ));
    }
}
