//! Link preview cards for static site directives.
//!
//! A directive such as `preview "Title" https://example.com/post` becomes a
//! small HTML card with the page's title, thumbnail and a short excerpt.
//! Rendered cards are kept in a flat-file cache keyed by the URL's MD5, so
//! each page is fetched once.

pub mod cache;
pub mod config;
pub mod directive;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod preview;
pub mod render;

pub use cache::{CacheError, SnippetCache, key_for};
pub use config::{Config, TitleMode};
pub use directive::{PreviewRequest, Substitute, TemplateContext, TemplateRenderer, Verbatim};
pub use error::PreviewError;
pub use extractor::{ContentExtractor, PageMetadata, ReadabilityExtractor};
pub use fetcher::{FetchError, HttpFetcher, PageResponse, PageSource};
pub use preview::PreviewBuilder;
pub use render::{PreviewSnippet, render_snippet};
