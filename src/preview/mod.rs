//! Preview orchestration: cache lookup, fetch, extraction, rendering, store.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::{SnippetCache, key_for};
use crate::config::{Config, TitleMode};
use crate::directive::{PreviewRequest, TemplateContext, TemplateRenderer};
use crate::error::PreviewError;
use crate::extractor::{self, ContentExtractor, PageMetadata, ReadabilityExtractor};
use crate::fetcher::{HttpFetcher, PageResponse, PageSource};
use crate::render::{PreviewSnippet, render_snippet};

pub struct PreviewBuilder {
    source: Arc<dyn PageSource>,
    content: Arc<dyn ContentExtractor>,
    cache: SnippetCache,
    title_mode: TitleMode,
}

impl PreviewBuilder {
    pub fn new(source: impl PageSource + 'static, cache: SnippetCache) -> Self {
        Self {
            source: Arc::new(source),
            content: Arc::new(ReadabilityExtractor),
            cache,
            title_mode: TitleMode::default(),
        }
    }

    /// HTTP fetching and a cache in `config.cache_dir()`.
    pub fn from_config(config: &Config) -> Result<Self, PreviewError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(fetcher, SnippetCache::open(config.cache_dir()))
            .with_title_mode(config.title_mode()))
    }

    pub fn with_content_extractor(mut self, content: impl ContentExtractor + 'static) -> Self {
        self.content = Arc::new(content);
        self
    }

    pub fn with_title_mode(mut self, title_mode: TitleMode) -> Self {
        self.title_mode = title_mode;
        self
    }

    pub fn cache(&self) -> &SnippetCache {
        &self.cache
    }

    /// Produce the snippet for `request`, from the cache when possible.
    ///
    /// A cached entry is returned as-is, whatever title the request carries.
    /// A failed cache write is logged and the fresh snippet is still returned.
    #[instrument(skip_all, fields(url = %request.url()))]
    pub async fn build(&self, request: &PreviewRequest) -> Result<PreviewSnippet, PreviewError> {
        let key = key_for(request.url());

        if self.cache.has(&key).await {
            debug!(%key, "cache hit");
            let html = self
                .cache
                .get(&key)
                .await
                .map_err(PreviewError::CacheRead)?;
            return Ok(PreviewSnippet::from_cached(html));
        }
        debug!(%key, "cache miss");

        let metadata = self.inspect(request).await?;
        let snippet = render_snippet(request.url(), &metadata);

        if let Err(e) = self.cache.put(&key, snippet.as_str()).await {
            let e = PreviewError::CacheWrite(e);
            warn!(error = %e, "page will be fetched again next time");
        } else {
            info!(%key, "cached new snippet");
        }

        Ok(snippet)
    }

    /// Fetch and extract without touching the cache.
    pub async fn inspect(&self, request: &PreviewRequest) -> Result<PageMetadata, PreviewError> {
        let page = self.source.fetch_page(request.url()).await?;
        Ok(self.metadata_for(request, &page))
    }

    fn metadata_for(&self, request: &PreviewRequest, page: &PageResponse) -> PageMetadata {
        extractor::extract(
            page,
            self.content.as_ref(),
            self.title_mode,
            request.title_override(),
        )
    }

    /// Run a directive line end to end: host template pass, parse, build.
    ///
    /// A line without a URL yields a snippet with every field empty.
    pub async fn render_directive(
        &self,
        renderer: &dyn TemplateRenderer,
        text: &str,
        context: &TemplateContext,
    ) -> Result<PreviewSnippet, PreviewError> {
        let rendered = renderer.render_template_text(text, context);

        match PreviewRequest::parse(&rendered) {
            Ok(request) => self.build(&request).await,
            Err(PreviewError::InvalidDirective(text)) => {
                warn!(directive = %text, "directive has no url, rendering empty preview");
                Ok(render_snippet("", &PageMetadata::default()))
            }
            Err(e) => Err(e),
        }
    }
}
