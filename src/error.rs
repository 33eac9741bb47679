use thiserror::Error;

/// Errors surfaced by the scraping pipeline.
///
/// Optional detail-page fields never produce an error; they degrade to `None`
/// inside the extractor.
#[derive(Debug, Error)]
pub enum Error {
    /// The login response carried one or more `.error` elements
    #[error("Error logging in: {0}")]
    Authentication(String),

    /// A required element was missing from a detail page
    #[error("Malformed page {url}: missing {field}")]
    MalformedPage { url: String, field: &'static str },

    /// The server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Pagination went past the configured page cap
    #[error("Pagination exceeded {0} pages")]
    PageLimitExceeded(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(url: &str, field: &'static str) -> Self {
        Error::MalformedPage {
            url: url.to_string(),
            field,
        }
    }

    /// Whether this error only concerns a single detail page, so a bulk fetch
    /// may skip the item and carry on
    pub fn is_malformed_page(&self) -> bool {
        matches!(self, Error::MalformedPage { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
