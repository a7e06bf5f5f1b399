use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failures fall into two classes: inputs the scraper recognizes but does
/// not support (`Unsupported`), which callers are expected to handle
/// locally, and everything else, which aborts the current call with no
/// partial result.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("unsupported {kind}: {value:?}")]
    Unsupported { kind: &'static str, value: String },

    #[error("element not found: {context}")]
    ElementNotFound { context: &'static str },

    #[error("malformed {context}: {value:?}")]
    Malformed { context: &'static str, value: String },

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("browser automation error: {0}")]
    Browser(anyhow::Error),
}

// anyhow::Error does not implement std::error::Error, so thiserror's
// #[from] cannot derive this one.
impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Browser(err)
    }
}

impl ScrapeError {
    /// True when the failure is a recognized-but-unsupported input rather
    /// than a fetch or parse problem.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
