use serde::Deserialize;

/// One search result handed to an agent's prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SerperResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganicResult {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    pub link: String,
}

impl From<OrganicResult> for SearchHit {
    fn from(result: OrganicResult) -> Self {
        Self {
            title: result.title,
            snippet: result.snippet,
            url: result.link,
        }
    }
}
