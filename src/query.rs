use crate::config::FeedConfig;

/// Builds feed-search URLs for a free-text query.
#[derive(Debug, Clone)]
pub struct QueryEncoder {
    endpoint: String,
    hl: String,
    gl: String,
    ceid: String,
}

impl QueryEncoder {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            hl: config.hl.clone(),
            gl: config.gl.clone(),
            ceid: config.ceid.clone(),
        }
    }

    /// Percent-encode the query and embed it with the locale parameters.
    /// The empty query is valid and yields `q=`.
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.endpoint,
            urlencoding::encode(query),
            self.hl,
            self.gl,
            self.ceid
        )
    }
}
