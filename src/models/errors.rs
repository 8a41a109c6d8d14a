use thiserror::Error;

/// Reasons a candidate URL or a message envelope was refused.
///
/// None of these reach callers of the sanitize entry points: a refused URL stays
/// escaped text and a refused envelope becomes an empty message.
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("URL scheme '{0}' is not allowed")]
    DisallowedScheme(String),
    #[error("Envelope JSON error: {0}")]
    EnvelopeParse(#[from] serde_json::Error),
    #[error("Envelope must be a JSON object")]
    EnvelopeShape,
}
