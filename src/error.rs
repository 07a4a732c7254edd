use thiserror::Error;

use crate::cache::CacheError;
use crate::fetcher::FetchError;

/// Everything that can stop a preview from being produced.
///
/// There is no parse variant: bodies are decoded with replacement and
/// html5ever accepts any input, so a fetched page always yields a document.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no http(s) url in directive: {0:?}")]
    InvalidDirective(String),

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("cache read failed: {0}")]
    CacheRead(CacheError),

    #[error("cache write failed: {0}")]
    CacheWrite(CacheError),
}
