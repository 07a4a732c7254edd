pub mod cleanup;
pub mod model;
pub mod probes;
pub mod reader;

#[cfg(test)]
mod tests;

pub use cleanup::cleanup;
pub use model::PageMetadata;
pub use reader::{ContentExtractor, ReadabilityExtractor};

use scraper::Html;

use crate::config::TitleMode;
use crate::fetcher::types::PageResponse;

/// Resolve title, description and thumbnail for a fetched page.
///
/// In [`TitleMode::Legacy`] the title chain runs only when an override is
/// given, and the override itself is discarded. In [`TitleMode::Fixed`] the
/// override wins and the chain runs only without one.
pub fn extract(
    resp: &PageResponse,
    content: &dyn ContentExtractor,
    title_mode: TitleMode,
    title_override: Option<&str>,
) -> PageMetadata {
    let document = Html::parse_document(&resp.body_utf8);

    let title = match (title_mode, title_override) {
        (TitleMode::Legacy, Some(_)) => resolve_title(&document),
        (TitleMode::Legacy, None) => None,
        (TitleMode::Fixed, Some(title)) => Some(title.to_string()),
        (TitleMode::Fixed, None) => resolve_title(&document),
    };

    PageMetadata {
        title,
        description: resolve_description(&document, resp, content),
        image_url: resolve_thumbnail(&document),
    }
}

pub fn resolve_title(document: &Html) -> Option<String> {
    probes::first_cleaned(document, probes::TITLE_PROBES)
}

/// Description metadata, or the page's main text when no description
/// element exists at all. A present but empty element leaves it empty.
pub fn resolve_description(
    document: &Html,
    resp: &PageResponse,
    content: &dyn ContentExtractor,
) -> Option<String> {
    let text = match probes::first_present(document, probes::DESCRIPTION_PROBES) {
        Some(value) => cleanup(&value),
        None => cleanup(&content.extract_main_content(&resp.body_utf8, &resp.url_final)),
    };
    non_blank(text)
}

/// The first thumbnail element wins, even when its value is empty.
pub fn resolve_thumbnail(document: &Html) -> Option<String> {
    probes::first_present(document, probes::THUMBNAIL_PROBES).and_then(non_blank)
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
