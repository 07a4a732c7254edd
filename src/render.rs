use std::fmt::{Display, Formatter};

use crate::extractor::PageMetadata;

/// Rendered preview card, ready to be dropped into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSnippet(String);

impl PreviewSnippet {
    /// Wrap markup that was rendered earlier (e.g. read back from the cache).
    pub fn from_cached(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for PreviewSnippet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format the card. Missing fields render as empty strings.
///
/// Values are inserted verbatim; nothing is escaped.
pub fn render_snippet(url: &str, metadata: &PageMetadata) -> PreviewSnippet {
    let title = metadata.title.as_deref().unwrap_or_default();
    let image = metadata.image_url.as_deref().unwrap_or_default();
    let description = metadata.description.as_deref().unwrap_or_default();

    PreviewSnippet(format!(
        "<h4><a href='{url}' target='_blank'>{title}</a></h4><img width='64' src='{image}' /><small>{description}</small>"
    ))
}
