use scraper::{Html, Selector};

use crate::extractor::cleanup::cleanup;

/// One place in a document where a value might live.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// An attribute of the first element matching the selector.
    Attr {
        selector: &'static str,
        attr: &'static str,
    },
    /// The trimmed text of the first element matching the selector.
    Text(&'static str),
}

impl Probe {
    const fn meta(selector: &'static str) -> Self {
        Self::Attr {
            selector,
            attr: "content",
        }
    }

    /// Raw value at this location; `None` if no element matches. A matching
    /// element without the attribute yields an empty string.
    pub fn run(&self, document: &Html) -> Option<String> {
        let selector_str = match self {
            Self::Attr { selector, .. } | Self::Text(selector) => selector,
        };
        let selector = Selector::parse(selector_str).ok()?;
        let element = document.select(&selector).next()?;

        match self {
            Self::Attr { attr, .. } => {
                Some(element.value().attr(attr).unwrap_or_default().to_string())
            }
            Self::Text(_) => Some(element.text().collect::<String>().trim().to_string()),
        }
    }
}

pub const TITLE_PROBES: &[Probe] = &[
    Probe::meta(r#"head meta[property="og:title"]"#),
    Probe::meta(r#"head meta[name="twitter:title"]"#),
    Probe::Text("head title"),
    Probe::meta(r#"head meta[name="dcterms.title"]"#),
    Probe::Text(".entry-title"),
    Probe::Text(".article_title"),
    Probe::Text("h1"),
    Probe::Text("h2"),
    Probe::Text("h3"),
];

pub const DESCRIPTION_PROBES: &[Probe] = &[
    Probe::meta(r#"head meta[property="og:description"]"#),
    Probe::meta(r#"head meta[name="twitter:description"]"#),
    Probe::meta(r#"head meta[name="dcterms.description"]"#),
];

pub const THUMBNAIL_PROBES: &[Probe] = &[
    Probe::meta(r#"head meta[property="og:image"]"#),
    Probe::meta(r#"head meta[name="twitter:image"]"#),
    Probe::Attr {
        selector: r#"head link[rel="image_src"]"#,
        attr: "href",
    },
];

/// First probe whose value is non-empty after [`cleanup`].
pub fn first_cleaned(document: &Html, probes: &[Probe]) -> Option<String> {
    probes
        .iter()
        .filter_map(|probe| probe.run(document))
        .map(|value| cleanup(&value))
        .find(|value| !value.trim().is_empty())
}

/// Value of the first probe whose element exists, even if that value is empty.
pub fn first_present(document: &Html, probes: &[Probe]) -> Option<String> {
    probes.iter().find_map(|probe| probe.run(document))
}
