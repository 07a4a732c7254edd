use url::Url;

use crate::config::TitleMode;
use crate::extractor::{ContentExtractor, PageMetadata, ReadabilityExtractor, extract};
use crate::fetcher::types::PageResponse;

struct FixedText(String);

impl FixedText {
    fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl ContentExtractor for FixedText {
    fn extract_main_content(&self, _html: &str, _base_url: &Url) -> String {
        self.0.clone()
    }
}

fn page(html: &str) -> PageResponse {
    PageResponse::from_html(Url::parse("https://example.com/article").unwrap(), html)
}

#[test]
fn test_full_metadata() {
    let html = r#"<!DOCTYPE html><html><head>
        <title>Sample Article - News Site</title>
        <meta property="og:title" content="Sample Article">
        <meta property="og:description" content="A	short summary">
        <meta property="og:image" content="https://example.com/images/sample.jpg">
        </head><body><h1>Sample Article</h1></body></html>"#;

    let metadata = extract(&page(html), &ReadabilityExtractor, TitleMode::Fixed, None);

    assert_eq!(
        metadata,
        PageMetadata {
            title: Some("Sample Article".to_string()),
            description: Some("Ashort summary".to_string()),
            image_url: Some("https://example.com/images/sample.jpg".to_string()),
        }
    );
}

#[test]
fn test_legacy_mode_without_override_skips_title() {
    let html = r#"<html><head><meta property="og:title" content="Ignored"></head><body></body></html>"#;

    let metadata = extract(&page(html), &FixedText::new(""), TitleMode::Legacy, None);
    assert_eq!(metadata.title, None);
}

#[test]
fn test_override_handling_per_mode() {
    let html = r#"<html><head><meta property="og:title" content="Extracted"></head></html>"#;
    let content = FixedText::new("");

    let legacy = extract(&page(html), &content, TitleMode::Legacy, Some("Given"));
    assert_eq!(legacy.title, Some("Extracted".to_string()));

    let fixed = extract(&page(html), &content, TitleMode::Fixed, Some("Given"));
    assert_eq!(fixed.title, Some("Given".to_string()));
}

#[test]
fn test_description_falls_back_to_main_content() {
    let html = "<html><head><title>No meta</title></head><body><p>Body</p></body></html>";

    let content = FixedText::new("The main\tcontent");

    let metadata = extract(&page(html), &content, TitleMode::Fixed, None);
    assert_eq!(metadata.title, Some("No meta".to_string()));
    assert_eq!(metadata.description, Some("The maincontent".to_string()));
    assert_eq!(metadata.image_url, None);
}

#[test]
fn test_empty_description_element_skips_main_content() {
    let html = r#"<html><head>
        <meta property="og:description" content="">
        <meta name="twitter:description" content="Later">
        <meta property="og:image" content="">
        <link rel="image_src" href="/thumb.png">
        </head><body></body></html>"#;
    let content = FixedText::new("Body text");

    let metadata = extract(&page(html), &content, TitleMode::Fixed, None);
    assert_eq!(metadata.description, None);
    assert_eq!(metadata.image_url, None);
}

#[test]
fn test_main_content_is_truncated() {
    let html = "<html><head></head><body></body></html>";

    let content = FixedText::new("word ".repeat(100));

    let metadata = extract(&page(html), &content, TitleMode::Fixed, None);
    let description = metadata.description.unwrap();
    assert_eq!(description.chars().count(), 204);
    assert!(description.ends_with("..."));
}

#[test]
fn test_empty_main_content_means_no_description() {
    let html = "<html><head></head><body></body></html>";

    let metadata = extract(&page(html), &FixedText::new(""), TitleMode::Fixed, None);
    assert_eq!(metadata, PageMetadata::default());
}

#[test]
fn test_readability_fallback_on_article_page() {
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{}</p></article></body></html>"#,
        "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(20)
    );

    let metadata = extract(&page(&html), &ReadabilityExtractor, TitleMode::Fixed, None);
    assert_eq!(metadata.title, Some("Valid Article".to_string()));
    let description = metadata.description.unwrap();
    assert!(description.contains("valid article"));
    assert!(description.ends_with("..."));
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    let metadata = extract(&page(html), &ReadabilityExtractor, TitleMode::Fixed, None);
    assert_eq!(metadata.title, Some("Broken".to_string()));
    // Readability may settle on either fragment; some text must survive
    assert!(!metadata.description.unwrap_or_default().is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::cleanup;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract(&page(&html), &ReadabilityExtractor, TitleMode::Fixed, None);
        }

        #[test]
        fn test_cleanup_bounds(text in ".*") {
            let cleaned = cleanup(&text);
            prop_assert!(!cleaned.contains('\t'));
            prop_assert!(cleaned.chars().count() <= 204);
        }
    }
}
