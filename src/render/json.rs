//! JSON rendering for outline results.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::DocumentResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
///
/// Non-ASCII text is written as UTF-8, not as `\u` escapes.
pub fn to_json(result: &DocumentResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an outline result as JSON to a writer.
pub fn write_json<W: Write>(writer: W, result: &DocumentResult, format: JsonFormat) -> Result<()> {
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, result)?,
        JsonFormat::Compact => serde_json::to_writer(writer, result)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentResult {
        let mut result = DocumentResult::new("Rapport annuel – été");
        result.push(OutlineEntry::new(HeadingLevel::H1, "1 Introduction", 1));
        result.push(OutlineEntry::new(HeadingLevel::H2, "1.1 Background", 2));
        result
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"outline\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains(r#"{"level":"H2","text":"1.1 Background","page":2}"#));
    }

    #[test]
    fn test_non_ascii_is_kept() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(json.contains("Rapport annuel – été"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_write_json_matches_to_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample(), JsonFormat::Pretty).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            to_json(&sample(), JsonFormat::Pretty).unwrap()
        );
    }

    #[test]
    fn test_empty_outline() {
        let json = to_json(&DocumentResult::unknown(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"Unknown Title","outline":[]}"#);
    }
}
