//! Turns raw user input into a request URL for the search page

use std::fmt;

use crate::error::SearchError;
use crate::traits::ScraperConfig;

/// Trimmed, non-empty search text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate the raw `q` parameter.
    ///
    /// # Returns
    /// * `Err(SearchError::InvalidQuery)` - when the input is missing or blank
    pub fn parse(raw: Option<&str>) -> Result<Self, SearchError> {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(Self(text.to_string())),
            _ => Err(SearchError::InvalidQuery),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fully formed search URL for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget(String);

impl RequestTarget {
    /// Substitute the percent-encoded query into the site's search pattern.
    ///
    /// Only the query is encoded; the fixed session parameters in the
    /// pattern are used as written.
    pub fn build(config: &ScraperConfig, query: &SearchQuery) -> Self {
        let encoded_query = urlencoding::encode(query.as_str());
        Self(
            config
                .search_url_pattern
                .replace("{query}", &encoded_query),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
