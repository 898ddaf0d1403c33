use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors surfaced by resume extraction and similarity ranking.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The document is not parseable XML or is missing the parts of the
    /// Lattes schema the extractor relies on.
    #[error("malformed resume '{document}': {reason}")]
    MalformedResume { document: String, reason: String },

    /// A caller-supplied value failed validation before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The similarity service kept answering 503 (model loading) until the
    /// retry budget ran out.
    #[error("similarity service unavailable after {attempts} attempts")]
    ScoringUnavailable { attempts: u32 },

    /// The similarity service rejected the request outright, or answered
    /// with something the ranker cannot use. Not retried.
    #[error("similarity request failed (status {status}): {message}")]
    ScoringRequest { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    pub(crate) fn malformed(document: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResume {
            document: document.to_string(),
            reason: reason.into(),
        }
    }
}
