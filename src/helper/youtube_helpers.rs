use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "youtu.be"];
const SHORT_LINK_HOST: &str = "youtu.be";
const ID_PATH_PREFIXES: &[&str] = &["shorts", "embed", "v"];

/// Every accepted URL shape in one pattern, for input the URL parser refuses.
/// The trailing group keeps a 12th id character from being silently dropped.
static YOUTUBE_ID_FALLBACK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i:https?://)?(?i:www\.)?(?:(?i:youtube\.com)/(?:watch\?(?:[^\s#]*&)?v=|embed/|v/|shorts/)|(?i:youtu\.be)/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    )
    .expect("YouTube fallback regex is valid")
});

pub fn is_valid_video_id(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

pub fn is_youtube_host(host: &str) -> bool {
    YOUTUBE_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h))
}

/// Returns the 11-character video id encoded by a YouTube URL.
///
/// Absolute URLs go through the parser and are read by host. Anything the parser
/// rejects (protocol-relative or scheme-less text) is matched against a single
/// pattern instead. Neither path authorizes the URL; callers must have run
/// `check_url` before trusting where the id came from.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => extract_from_parsed(&parsed),
        Err(_) => extract_with_pattern(url),
    }
}

/// Which paths may carry the id in the `v` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchParam {
    AnyPath,
    WatchPathOnly,
}

pub(crate) fn extract_from_parsed(parsed: &Url) -> Option<String> {
    id_from_parsed(parsed, WatchParam::AnyPath)
}

/// Like `extract_from_parsed`, but `v` only counts on the `/watch` page. This is the
/// stricter reading used to decide whether a link is embedded as a video.
pub(crate) fn embeddable_id(parsed: &Url) -> Option<String> {
    id_from_parsed(parsed, WatchParam::WatchPathOnly)
}

fn id_from_parsed(parsed: &Url, watch_param: WatchParam) -> Option<String> {
    let host = parsed.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();

    if host.eq_ignore_ascii_case(SHORT_LINK_HOST) {
        return segments
            .first()
            .filter(|id| is_valid_video_id(id))
            .map(|id| id.to_string());
    }

    if watch_param == WatchParam::AnyPath || segments.first() == Some(&"watch") {
        if let Some((_, v)) = parsed.query_pairs().find(|(key, _)| key == "v") {
            if is_valid_video_id(&v) {
                return Some(v.into_owned());
            }
        }
    }

    match segments.as_slice() {
        [prefix, id, ..] if ID_PATH_PREFIXES.contains(prefix) && is_valid_video_id(id) => {
            Some(id.to_string())
        }
        _ => None,
    }
}

fn extract_with_pattern(text: &str) -> Option<String> {
    YOUTUBE_ID_FALLBACK_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
