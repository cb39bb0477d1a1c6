//! Integration tests for outline extraction over synthetic spans.

use pdf_outline::outline::{is_meaningful_heading, is_valid_declared_title};
use pdf_outline::{
    extract_spans, DocumentResult, FontSizeProfile, HeadingLevel, HeadingPatterns,
    OutlineConfig, OutlineEntry, OutlineExtractor, SizeLevel, TextSpan,
};

fn body(count: usize, size: f32, page: u32) -> Vec<TextSpan> {
    (0..count)
        .map(|_| TextSpan::plain("This is body text.", size, page))
        .collect()
}

fn scenario_spans() -> Vec<TextSpan> {
    let mut spans = vec![TextSpan::new("Chapter 1: Intro", 24.0, "Helvetica-Bold", 1)];
    spans.extend(body(10, 12.0, 1));
    spans.push(TextSpan::plain("This is more body.", 12.0, 1));
    spans.push(TextSpan::plain("1.1 Background", 18.0, 1));
    spans
}

#[test]
fn test_scenario_end_to_end() {
    let spans = scenario_spans();
    let extractor = OutlineExtractor::new();

    let profile = extractor.profile(&spans).unwrap();
    assert_eq!(profile.body_size, 12.0);
    assert!(profile.heading_sizes.contains(&24.0));
    assert!(profile.heading_sizes.contains(&18.0));

    let result = extractor.extract(&spans, None);
    assert_eq!(result.title, "Chapter 1: Intro");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H2, "1.1 Background", 1)]
    );
}

#[test]
fn test_scenario_json_shape() {
    let result = extract_spans(&scenario_spans(), None);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Chapter 1: Intro",
            "outline": [{ "level": "H2", "text": "1.1 Background", "page": 1 }]
        })
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(extract_spans(&[], None), DocumentResult::unknown());
    assert_eq!(
        extract_spans(&[], None),
        DocumentResult {
            title: "Unknown Title".to_string(),
            outline: vec![],
        }
    );
}

#[test]
fn test_totality_on_odd_inputs() {
    let inputs = vec![
        vec![TextSpan::plain("x", 0.1, 1)],
        vec![TextSpan::plain("!!!", 12.0, 0)],
        vec![
            TextSpan::plain("1.2.3.4.5 Deep numbering", 9.0, 4),
            TextSpan::plain("12", 9.0, 4),
        ],
        vec![TextSpan::plain("Only Heading Candidate", 40.0, 2)],
        vec![TextSpan::plain("   ", 12.0, 1)],
    ];

    for spans in inputs {
        let result = extract_spans(&spans, Some(""));
        assert!(!result.title.is_empty());
        for entry in &result.outline {
            assert!(!entry.text.trim().is_empty());
        }
    }
}

#[test]
fn test_mode_picks_most_frequent_size() {
    let mut spans = body(5, 10.0, 1);
    spans.extend(body(4, 14.0, 1));
    spans.extend(body(1, 30.0, 1));

    let profile = FontSizeProfile::from_spans(&spans, &OutlineConfig::default()).unwrap();
    assert_eq!(profile.body_size, 10.0);
}

#[test]
fn test_ratio_threshold_is_inclusive() {
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("Eleven point", 11.0, 1));
    spans.push(TextSpan::plain("Eleven and a half", 11.5, 1));
    spans.push(TextSpan::plain("Twenty point", 20.0, 1));

    let profile = FontSizeProfile::from_spans(&spans, &OutlineConfig::default()).unwrap();
    assert_eq!(profile.heading_sizes, vec![20.0, 11.5]);
    assert_eq!(profile.level_of(20.0), SizeLevel::Title);
    assert_eq!(profile.level_of(11.5), SizeLevel::H1);
    assert_eq!(profile.level_of(11.0), SizeLevel::Body);
}

#[test]
fn test_numbering_takes_precedence_over_size() {
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("2.3 Methodology", 10.0, 1));
    spans.push(TextSpan::plain("2.3 ok", 10.0, 1));

    let result = extract_spans(&spans, None);
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H2, "2.3 Methodology", 1)]
    );
}

#[test]
fn test_numbering_depth_caps_at_h3() {
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("4 Findings", 10.0, 2));
    spans.push(TextSpan::plain("4.1.2 Soil Moisture", 10.0, 2));
    spans.push(TextSpan::plain("4.1.2.7 Sampling Method", 10.0, 3));

    let result = extract_spans(&spans, None);
    let levels: Vec<_> = result.outline.iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![HeadingLevel::H1, HeadingLevel::H3, HeadingLevel::H3]
    );
}

#[test]
fn test_dates_are_never_headings() {
    for size in [10.0, 14.0, 30.0] {
        let mut spans = body(10, 10.0, 1);
        spans.push(TextSpan::plain("Cover Title", 30.0, 1));
        spans.push(TextSpan::plain("Heading Two", 14.0, 1));
        spans.push(TextSpan::plain("15 March 2024", size, 1));

        let result = extract_spans(&spans, None);
        assert!(result.outline.iter().all(|e| e.text != "15 March 2024"));
    }
}

#[test]
fn test_skip_list_text_is_never_a_heading() {
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("Signature", 30.0, 1));
    spans.push(TextSpan::plain("Signature", 20.0, 1));

    let result = extract_spans(&spans, None);
    assert!(result.outline.is_empty());
}

#[test]
fn test_title_from_largest_page_one_span() {
    let mut spans = vec![TextSpan::plain("Annual Report 2024", 28.0, 1)];
    spans.extend(body(10, 10.0, 1));
    spans.push(TextSpan::plain("Bigger On Page Two", 40.0, 2));

    let result = extract_spans(&spans, Some(""));
    assert_eq!(result.title, "Annual Report 2024");
}

#[test]
fn test_placeholder_declared_title_rejected() {
    let config = OutlineConfig::default();
    assert!(!is_valid_declared_title("Microsoft Word - doc1.docx", &config));

    let mut spans = vec![TextSpan::plain("Project Charter", 24.0, 1)];
    spans.extend(body(10, 10.0, 1));

    let result = extract_spans(&spans, Some("Microsoft Word - doc1.docx"));
    assert_eq!(result.title, "Project Charter");
}

#[test]
fn test_valid_declared_title_wins() {
    let mut spans = vec![TextSpan::plain("Project Charter", 24.0, 1)];
    spans.extend(body(10, 10.0, 1));

    let result = extract_spans(&spans, Some("Highway Expansion Study"));
    assert_eq!(result.title, "Highway Expansion Study");
}

#[test]
fn test_title_falls_back_to_largest_span_without_title_level() {
    // The Title-level span sits on page 2, so page 1's largest span is used
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("Later Cover", 30.0, 2));

    let result = extract_spans(&spans, None);
    assert_eq!(result.title, "This is body text.");
}

#[test]
fn test_no_page_one_text_gives_unknown_title() {
    let mut spans = body(10, 10.0, 2);
    spans.push(TextSpan::plain("Cover on Page Two", 30.0, 2));

    let result = extract_spans(&spans, None);
    assert_eq!(result.title, "Unknown Title");
}

#[test]
fn test_meaningful_heading_predicate() {
    let patterns = HeadingPatterns::new();
    let config = OutlineConfig::default();

    assert!(is_meaningful_heading("Introduction", &patterns, &config));
    assert!(!is_meaningful_heading("Info", &patterns, &config));
    assert!(!is_meaningful_heading("1.2.3", &patterns, &config));
    assert!(!is_meaningful_heading("----", &patterns, &config));
    assert!(!is_meaningful_heading("Home Town", &patterns, &config));
}

#[test]
fn test_custom_config_skip_keywords() {
    let mut spans = body(10, 10.0, 1);
    spans.push(TextSpan::plain("Cover Title", 30.0, 1));
    spans.push(TextSpan::plain("Appendix Tables", 20.0, 2));

    let config = OutlineConfig::default().add_skip_keyword("appendix");
    let result = OutlineExtractor::with_config(config).extract(&spans, None);
    assert!(result.outline.is_empty());

    let result = OutlineExtractor::new().extract(&spans, None);
    assert_eq!(result.outline.len(), 1);
}

#[test]
fn test_config_from_json() {
    let config = OutlineConfig::from_json(r#"{"heading_size_ratio": 1.3}"#).unwrap();
    assert_eq!(config.heading_size_ratio, 1.3);
    assert_eq!(config.max_heading_sizes, 3);
    assert!(OutlineConfig::from_json(r#"{"heading_size_ratio": -1}"#).is_err());
}

#[test]
fn test_extractor_is_shareable_across_threads() {
    let extractor = OutlineExtractor::new();
    let spans = scenario_spans();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| extractor.extract(&spans, None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().title, "Chapter 1: Intro");
        }
    });
}
