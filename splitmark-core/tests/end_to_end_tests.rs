//! End-to-end tests for the complete segmentation pipeline

use splitmark_core::{
    segment, ConfigError, Correction, Diagnostic, Document, SegmentConfig, SegmentationEngine,
    SplitKind, StyleTag,
};

/// `len` characters of filler ending with a period
fn terminated(len: usize) -> String {
    format!("{}.", "a".repeat(len - 1))
}

/// Ten-character Chinese sentences
fn chinese_sentences(count: usize) -> String {
    "这是第一句话的内容。".repeat(count)
}

fn config(min: usize, max: usize) -> SegmentConfig {
    SegmentConfig::builder()
        .min_length(min)
        .max_length(max)
        .build()
        .unwrap()
}

#[test]
fn test_heading_and_two_bodies() {
    let document = Document::new()
        .with_paragraph("Introduction to text", StyleTag::Heading)
        .with_paragraph(terminated(900), StyleTag::Body)
        .with_paragraph(terminated(150), StyleTag::Body);

    let result = segment(&document, &config(500, 1000)).unwrap();

    assert_eq!(result.offsets(), vec![920, 1070]);
    assert_eq!(result.decisions[1].kind, SplitKind::DocumentEnd);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_single_oversized_paragraph() {
    let document = Document::new().with_paragraph("x".repeat(5000), StyleTag::Body);

    let result = segment(&document, &config(300, 1000)).unwrap();

    assert_eq!(result.decisions.len(), 1);
    assert_eq!(result.decisions[0].offset, 5000);
    assert_eq!(result.decisions[0].kind, SplitKind::Oversized);
    assert!(matches!(
        result.diagnostics.as_slice(),
        [Diagnostic::OversizedParagraph {
            paragraph_index: 0,
            ..
        }]
    ));
}

#[test]
fn test_min_above_max_is_rejected_before_processing() {
    let config = SegmentConfig {
        min_length: 100,
        max_length: 50,
        ..SegmentConfig::default()
    };

    assert!(matches!(
        segment(&Document::new(), &config),
        Err(ConfigError::LengthRange { min: 100, max: 50 })
    ));
    assert!(SegmentationEngine::new(config).is_err());
}

#[test]
fn test_chinese_split_snaps_to_sentence_end() {
    let mut unfinished = chinese_sentences(12);
    unfinished.push_str("未完");
    let document = Document::new()
        .with_paragraph(chinese_sentences(25), StyleTag::Body)
        .with_paragraph(unfinished, StyleTag::Body)
        .with_paragraph(chinese_sentences(20), StyleTag::Body);
    let config = SegmentConfig::builder()
        .min_length(100)
        .max_length(300)
        .search_window(50)
        .build()
        .unwrap();

    let result = segment(&document, &config).unwrap();

    assert_eq!(result.offsets(), vec![250, 370, 572]);
    assert_eq!(result.decisions[0].correction, Correction::Exact);
    assert_eq!(
        result.decisions[1].correction,
        Correction::Snapped { from: 372 }
    );
    assert_eq!(result.decisions[1].source_paragraph_index, 1);
}

#[test]
fn test_integrity_weight_avoids_mid_sentence_split() {
    let document = Document::new()
        .with_paragraph("word ".repeat(100), StyleTag::Body)
        .with_paragraph("Second part overview", StyleTag::Heading)
        .with_paragraph(terminated(300), StyleTag::Body)
        .with_paragraph(terminated(100), StyleTag::Body);

    let strict = config(300, 1000);
    let result = segment(&document, &strict).unwrap();
    assert_eq!(result.offsets(), vec![820, 920]);
    assert!(result.diagnostics.is_empty());

    let lax = SegmentConfig {
        sentence_integrity_weight: 0.0,
        ..strict
    };
    let result = segment(&document, &lax).unwrap();
    assert_eq!(result.offsets(), vec![500, 920]);
    assert_eq!(result.decisions[0].correction, Correction::Uncorrected);
    assert!(matches!(
        result.diagnostics.as_slice(),
        [Diagnostic::DegradedSplit { offset: 500, .. }]
    ));
}

#[test]
fn test_max_length_wins_over_min_length() {
    let document = Document::new()
        .with_paragraph(terminated(400), StyleTag::Body)
        .with_paragraph(terminated(700), StyleTag::Body);

    let result = segment(&document, &config(500, 1000)).unwrap();

    assert_eq!(result.offsets(), vec![400, 1100]);
    assert_eq!(result.decisions[0].kind, SplitKind::Forced);
    assert!(matches!(
        result.diagnostics.as_slice(),
        [Diagnostic::UndersizedSegment {
            start_offset: 0,
            end_offset: 400,
            min_length: 500,
        }]
    ));
}

#[test]
fn test_only_empty_paragraphs() {
    let document = Document::new()
        .with_paragraph("", StyleTag::Body)
        .with_paragraph("", StyleTag::Body);

    let result = segment(&document, &SegmentConfig::default()).unwrap();

    assert_eq!(result.offsets(), vec![0]);
    assert_eq!(result.decisions[0].kind, SplitKind::DocumentEnd);
}

#[test]
fn test_segments_rebuild_the_logical_text() {
    let document = Document::new()
        .with_paragraph("Overview", StyleTag::Heading)
        .with_paragraph(chinese_sentences(30), StyleTag::Body)
        .with_paragraph("A short English closing paragraph.", StyleTag::Body)
        .with_paragraph(chinese_sentences(25), StyleTag::Body);

    let result = segment(&document, &config(100, 300)).unwrap();
    let segments = result.segments(&document);

    let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(rebuilt, document.logical_text());
    for segment in &segments {
        assert!(segment.text.chars().count() <= 300);
    }
}

#[test]
fn test_segmentation_serializes_to_json() {
    let document = Document::new()
        .with_paragraph("Introduction to text", StyleTag::Heading)
        .with_paragraph(terminated(900), StyleTag::Body)
        .with_paragraph(terminated(150), StyleTag::Body);

    let result = segment(&document, &config(500, 1000)).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["decisions"][0]["offset"], 920);
    assert_eq!(json["decisions"][0]["kind"], "scored");
    assert_eq!(json["decisions"][0]["correction"]["status"], "exact");
    assert!(json.get("trace").is_none());
}
