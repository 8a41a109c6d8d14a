use crate::helper::escape_helpers::escape_html;
use crate::helper::youtube_helpers::extract_youtube_id;
use crate::models::MediaKind;

const LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;
const IMAGE_STYLE: &str = "max-width:320px;max-height:240px;border-radius:6px;";
const VIDEO_STYLE: &str = "max-width:420px;max-height:320px;border-radius:6px;";
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const YOUTUBE_IFRAME_ATTRS: &str = r#"frameborder="0" allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture" referrerpolicy="no-referrer" allowfullscreen"#;

/// Builds the fixed HTML fragment for a URL that already passed `check_url`.
///
/// The URL is escaped here again before it goes into any attribute or text. Apart from
/// that URL, and the 11-character id for YouTube, every byte of output is a constant.
pub fn render_markup(kind: MediaKind, url: &str) -> String {
    let safe_url = escape_html(url);
    match kind {
        MediaKind::Image => format!(
            r#"<a href="{url}" {LINK_ATTRS}><img src="{url}" alt="image" style="{IMAGE_STYLE}" loading="lazy" /></a>"#,
            url = safe_url
        ),
        MediaKind::Video => format!(
            r#"<video controls style="{VIDEO_STYLE}"><source src="{url}"></video>"#,
            url = safe_url
        ),
        MediaKind::YouTube => match extract_youtube_id(url) {
            Some(id) => format!(
                r#"<iframe width="560" height="315" src="{YOUTUBE_EMBED_BASE}{id}" {YOUTUBE_IFRAME_ATTRS}></iframe>"#,
                id = escape_html(&id)
            ),
            None => render_link(&safe_url),
        },
        MediaKind::GenericLink => render_link(&safe_url),
    }
}

fn render_link(safe_url: &str) -> String {
    format!(r#"<a href="{safe_url}" {LINK_ATTRS}>{safe_url}</a>"#)
}
