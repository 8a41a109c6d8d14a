use crate::helper::url_helpers::check_url;
use crate::helper::youtube_helpers;
use crate::models::MediaKind;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp", ".svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".ogg", ".mov", ".mkv"];

/// Hosts that serve images without a file extension, with the path shape they use.
static UNLABELED_IMAGE_HOSTS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![(
        "images.unsplash.com",
        Regex::new(r"^/photo-[A-Za-z0-9_-]+").expect("unsplash path regex is valid"),
    )]
});

type MediaRule = (fn(&Url) -> bool, MediaKind);

/// Tried top to bottom; the first matching predicate decides the kind.
/// Extensions come before host checks because they are the less ambiguous signal.
const MEDIA_RULES: &[MediaRule] = &[
    (has_image_extension, MediaKind::Image),
    (is_unlabeled_image, MediaKind::Image),
    (has_video_extension, MediaKind::Video),
    (is_youtube_video, MediaKind::YouTube),
];

fn path_ends_with_any(url: &Url, extensions: &[&str]) -> bool {
    let path = url.path().to_ascii_lowercase();
    extensions.iter().any(|ext| path.ends_with(ext))
}

fn has_image_extension(url: &Url) -> bool {
    path_ends_with_any(url, IMAGE_EXTENSIONS)
}

fn has_video_extension(url: &Url) -> bool {
    path_ends_with_any(url, VIDEO_EXTENSIONS)
}

fn is_unlabeled_image(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    UNLABELED_IMAGE_HOSTS
        .iter()
        .any(|(allowed, path_shape)| host == *allowed && path_shape.is_match(url.path()))
}

fn is_youtube_video(url: &Url) -> bool {
    youtube_helpers::embeddable_id(url).is_some()
}

/// Classifies an already parsed, scheme-checked URL.
pub fn classify_parsed(url: &Url) -> MediaKind {
    MEDIA_RULES
        .iter()
        .find(|(matches, _)| matches(url))
        .map(|(_, kind)| *kind)
        .unwrap_or(MediaKind::GenericLink)
}

/// Returns what `url` points at, or `None` when it does not pass the URL safety gate.
pub fn classify_media(url: &str) -> Option<MediaKind> {
    check_url(url).ok().map(|parsed| classify_parsed(&parsed))
}
