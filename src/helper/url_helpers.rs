use crate::models::errors::SanitizeError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Substrings of a message that look like absolute web URLs.
pub static CANDIDATE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("candidate URL regex is valid"));

/// Parses `candidate` and accepts it only when the scheme is `http` or `https`.
///
/// This is the single gate every URL passes before it is classified or rendered.
pub fn check_url(candidate: &str) -> Result<Url, SanitizeError> {
    let parsed = Url::parse(candidate)?;

    // The parser lowercases the scheme, so `HTTPS://` lands here as `https`.
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SanitizeError::DisallowedScheme(other.to_string())),
    }
}

pub fn is_safe_url(candidate: &str) -> bool {
    match check_url(candidate) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Rejected URL candidate: {}", e);
            false
        }
    }
}
