use serde::{Deserialize, Serialize};

/// What a page says about itself. Each field holds the value of the first
/// probe that matched; nothing is merged across probes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
