//! Document title resolution.

use crate::model::{SizeLevel, TextSpan};

use super::{FontSizeProfile, OutlineConfig};

/// Check a declared metadata title against placeholder and file-name rules.
///
/// "Microsoft Word - report.docx", "untitled" and very short titles are
/// generator noise rather than a real title.
pub fn is_valid_declared_title(title: &str, config: &OutlineConfig) -> bool {
    let title = title.trim();
    if title.is_empty() || title.chars().count() < config.min_title_len {
        return false;
    }

    let lower = title.to_lowercase();
    if config
        .placeholder_terms
        .iter()
        .any(|term| lower.contains(&term.to_lowercase()))
    {
        return false;
    }

    !config
        .invalid_title_suffixes
        .iter()
        .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
}

/// Resolve the document title.
///
/// Order of preference:
/// 1. the declared title, if valid;
/// 2. the largest Title-level span on page 1;
/// 3. the largest span of any level on page 1;
/// 4. the configured fallback title.
///
/// Size ties go to the first span encountered.
pub fn resolve_title(
    spans: &[TextSpan],
    declared_title: Option<&str>,
    profile: &FontSizeProfile,
    config: &OutlineConfig,
) -> String {
    if let Some(declared) = declared_title {
        if is_valid_declared_title(declared, config) {
            log::debug!("using declared title {:?}", declared.trim());
            return declared.trim().to_string();
        }
        log::debug!("rejected declared title {:?}", declared);
    }

    let first_page = || spans.iter().filter(|s| s.page == 1 && !s.is_blank());

    let from_title_level = largest_span(
        first_page().filter(|s| profile.level_of(s.font_size) == SizeLevel::Title),
    );

    from_title_level
        .or_else(|| largest_span(first_page()))
        .map(|span| span.trimmed().to_string())
        .unwrap_or_else(|| config.fallback_title.clone())
}

fn largest_span<'a>(spans: impl Iterator<Item = &'a TextSpan>) -> Option<&'a TextSpan> {
    spans.fold(None::<&'a TextSpan>, |best, span| match best {
        Some(b) if span.font_size <= b.font_size => Some(b),
        _ => Some(span),
    })
}
