//! Integration tests for single-document outline extraction.

mod common;

use pdfsieve::{
    extract_outline, extract_outline_with_options, Error, ExtractOptions, OutlineLevel,
};

#[test]
fn test_extracts_company_report_outline() {
    let pdf = common::company_report_pdf();
    let outline = extract_outline(&pdf).unwrap();

    assert_eq!(outline.title, "Company Report");
    assert_eq!(outline.outline.len(), 2);

    let overview = &outline.outline[0];
    assert_eq!(overview.text, "1. Overview");
    assert_eq!(overview.level, OutlineLevel::H1);
    assert_eq!(overview.page, 1);
    assert_eq!(overview.children.len(), 1);

    let background = &overview.children[0];
    assert_eq!(background.text, "1.1 Background");
    assert_eq!(background.level, OutlineLevel::H2);
    assert_eq!(background.page, 1);

    let results = &outline.outline[1];
    assert_eq!(results.text, "2. Results");
    assert_eq!(results.level, OutlineLevel::H1);
    assert_eq!(results.page, 2);
    assert!(results.children.is_empty());
}

#[test]
fn test_outline_is_well_formed() {
    let pdf = common::company_report_pdf();
    let outline = extract_outline(&pdf).unwrap();
    assert!(outline.is_well_formed());
    assert_eq!(outline.node_count(), 3);
}

#[test]
fn test_extraction_is_idempotent() {
    let pdf = common::company_report_pdf();
    let first = extract_outline(&pdf).unwrap();
    let second = extract_outline(&pdf).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_body_prose_is_not_promoted() {
    let pdf = common::company_report_pdf();
    let outline = extract_outline(&pdf).unwrap();

    let mut texts = Vec::new();
    outline.walk(|n| texts.push(n.text.clone()));
    assert!(!texts.iter().any(|t| t.ends_with('.')));
}

#[test]
fn test_page_limit_enforced() {
    let page: Vec<common::TextItem<'_>> = vec![("Filler Page", 12.0, 72.0, 720.0)];
    let pages: Vec<_> = (0..51).map(|_| page.clone()).collect();
    let pdf = common::build_pdf(&pages);

    let err = extract_outline(&pdf).unwrap_err();
    match err {
        Error::PageLimitExceeded { pages, limit } => {
            assert_eq!(pages, 51);
            assert_eq!(limit, 50);
        }
        other => panic!("expected PageLimitExceeded, got {}", other),
    }

    // The same document passes with a raised limit.
    let options = ExtractOptions::default().with_max_pages(60);
    assert!(extract_outline_with_options(&pdf, options).is_ok());
}

#[test]
fn test_zero_text_pdf_is_unreadable() {
    let pdf = common::build_pdf(&[vec![]]);
    let err = extract_outline(&pdf).unwrap_err();
    assert!(matches!(err, Error::UnreadablePdf(_)));
}

#[test]
fn test_garbage_bytes_are_unreadable() {
    let err = extract_outline(b"this is not a pdf document").unwrap_err();
    assert!(matches!(err, Error::UnreadablePdf(_)));
}

#[test]
fn test_outline_serializes_with_level_names() {
    let pdf = common::company_report_pdf();
    let outline = extract_outline(&pdf).unwrap();

    let json = serde_json::to_value(&outline).unwrap();
    assert_eq!(json["title"], "Company Report");
    assert_eq!(json["outline"][0]["level"], "H1");
    assert_eq!(json["outline"][0]["children"][0]["level"], "H2");
}
