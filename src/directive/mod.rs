//! Directive text handling.
//!
//! A directive line looks like `preview ["Optional title"] https://example.com/page`.
//! The host may embed its own template variables in that line, so the text
//! goes through a [`TemplateRenderer`] before it is scanned.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::PreviewError;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*)""#).unwrap());

static VARIABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][\w.]*)\s*\}\}").unwrap());

/// Variables visible to the host template pass.
pub type TemplateContext = HashMap<String, String>;

/// One preview to produce. Built per directive and dropped after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    url: String,
    title_override: Option<String>,
}

impl PreviewRequest {
    pub fn new(url: impl Into<String>, title_override: Option<String>) -> Self {
        Self {
            url: url.into(),
            title_override: title_override.filter(|t| !t.is_empty()),
        }
    }

    /// Scan already-rendered directive text.
    ///
    /// The URL is the first `http://` or `https://` run of non-whitespace.
    /// The title is everything between the first and the last double quote,
    /// with quotes and square brackets removed.
    pub fn parse(text: &str) -> Result<Self, PreviewError> {
        let url = URL_REGEX
            .find(text)
            .ok_or_else(|| PreviewError::InvalidDirective(text.to_string()))?
            .as_str();

        let title = TITLE_REGEX
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(['"', '[', ']'], ""));

        Ok(Self::new(url, title))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title_override(&self) -> Option<&str> {
        self.title_override.as_deref()
    }
}

/// The host's template pass over directive text.
pub trait TemplateRenderer: Send + Sync {
    fn render_template_text(&self, text: &str, context: &TemplateContext) -> String;
}

/// Leaves directive text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Verbatim;

impl TemplateRenderer for Verbatim {
    fn render_template_text(&self, text: &str, _context: &TemplateContext) -> String {
        text.to_string()
    }
}

/// Replaces `{{ name }}` with the matching context value. Unknown names
/// render as empty text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Substitute;

impl TemplateRenderer for Substitute {
    fn render_template_text(&self, text: &str, context: &TemplateContext) -> String {
        VARIABLE_REGEX
            .replace_all(text, |caps: &Captures| {
                context.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}
