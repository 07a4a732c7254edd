use readability::extractor;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::extractor::cleanup::collapse_whitespace;

const MIN_BLOCK_TEXT: usize = 100;

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".content",
    ".post",
    ".article",
    "#content",
    "#main",
    ".entry-content",
];

/// Pulls the dominant block of text out of a page that carries no
/// description metadata.
pub trait ContentExtractor: Send + Sync {
    fn extract_main_content(&self, html: &str, base_url: &Url) -> String;
}

/// Readability scoring, with a selector heuristic when readability gives up.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadabilityExtractor;

impl ContentExtractor for ReadabilityExtractor {
    fn extract_main_content(&self, html: &str, base_url: &Url) -> String {
        match extractor::extract(&mut html.as_bytes(), base_url) {
            Ok(article) if !article.text.trim().is_empty() => collapse_whitespace(&article.text),
            Ok(_) => {
                debug!("readability found no text, using selector fallback");
                fallback_main_content(&Html::parse_document(html))
            }
            Err(e) => {
                debug!(error = ?e, "readability failed, using selector fallback");
                fallback_main_content(&Html::parse_document(html))
            }
        }
    }
}

fn fallback_main_content(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = collapse_whitespace(&element.text().collect::<String>());
            if text.len() > MIN_BLOCK_TEXT {
                return text;
            }
        }
    }

    // Last resort: the whole body
    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return collapse_whitespace(&body.text().collect::<String>());
    }

    String::new()
}
