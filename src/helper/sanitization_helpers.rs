use crate::helper::escape_helpers::escape_html;
use crate::helper::markup_helpers::render_markup;
use crate::helper::media_helpers::classify_parsed;
use crate::helper::url_helpers::{check_url, CANDIDATE_URL_REGEX};
use crate::models::errors::SanitizeError;
use crate::models::{EnvelopeDefaults, MediaKind, RawEnvelope, SanitizedMessage};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Typical injection vectors. Only used to log; the output is escaped regardless.
static SUSPICIOUS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*script\b|on\w+\s*=|javascript:|data:text/html")
        .expect("suspicious pattern regex is valid")
});

pub fn looks_suspicious(text: &str) -> bool {
    SUSPICIOUS_REGEX.is_match(text)
}

/// Turns one untrusted chat message into an HTML fragment that is safe to render.
///
/// A message that is nothing but an image or YouTube URL becomes that single embed.
/// Anything else is escaped, and each safe `http(s)://` URL inside it is replaced in
/// place by its image, video, iframe or link fragment.
pub fn sanitize_message(raw: &str) -> String {
    let body = raw.trim();

    if let Some(embed) = render_whole_message(body) {
        return embed;
    }

    if looks_suspicious(body) {
        log::warn!("Message contains a likely injection vector; emitting it as escaped text.");
    }

    let mut output = String::with_capacity(body.len());
    let mut last_end = 0;
    for candidate in CANDIDATE_URL_REGEX.find_iter(body) {
        output.push_str(&escape_html(&body[last_end..candidate.start()]));
        output.push_str(&render_candidate(candidate.as_str()));
        last_end = candidate.end();
    }
    output.push_str(&escape_html(&body[last_end..]));
    output
}

/// The whole-message fast path: only a lone image or YouTube URL qualifies.
fn render_whole_message(body: &str) -> Option<String> {
    if body.is_empty() || body.contains(char::is_whitespace) {
        return None;
    }
    let parsed = check_url(body).ok()?;
    match classify_parsed(&parsed) {
        kind @ (MediaKind::Image | MediaKind::YouTube) => Some(render_markup(kind, body)),
        _ => None,
    }
}

fn render_candidate(candidate: &str) -> String {
    match check_url(candidate) {
        Ok(parsed) => render_markup(classify_parsed(&parsed), candidate),
        Err(e) => {
            log::debug!("Leaving URL candidate as text: {}", e);
            escape_html(candidate)
        }
    }
}

fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

pub fn sanitize_envelope(envelope: RawEnvelope) -> SanitizedMessage {
    sanitize_envelope_with(envelope, &EnvelopeDefaults::default())
}

/// Sanitizes the message body and fills in `name`/`color` when they are absent or not
/// strings. `name` and `color` are passed through as given otherwise.
pub fn sanitize_envelope_with(envelope: RawEnvelope, defaults: &EnvelopeDefaults) -> SanitizedMessage {
    let message = string_field(envelope.message)
        .map(|raw| sanitize_message(&raw))
        .unwrap_or_default();

    SanitizedMessage {
        message,
        name: string_field(envelope.name).unwrap_or_else(|| defaults.name.clone()),
        color: string_field(envelope.color).unwrap_or_else(|| defaults.color.clone()),
    }
}

pub fn parse_envelope(raw_json: &str) -> Result<RawEnvelope, SanitizeError> {
    let value: Value = serde_json::from_str(raw_json)?;
    if !value.is_object() {
        return Err(SanitizeError::EnvelopeShape);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn sanitize_envelope_json(raw_json: &str) -> String {
    sanitize_envelope_json_with(raw_json, &EnvelopeDefaults::default())
}

/// JSON in, JSON out. Input that is not a JSON object becomes an empty message.
pub fn sanitize_envelope_json_with(raw_json: &str, defaults: &EnvelopeDefaults) -> String {
    let envelope = match parse_envelope(raw_json) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::debug!("Discarding malformed envelope: {}", e);
            RawEnvelope::default()
        }
    };

    let sanitized = sanitize_envelope_with(envelope, defaults);
    serde_json::to_string(&sanitized).unwrap_or_else(|e| {
        log::error!("Failed to serialize sanitized message: {}", e);
        String::from(r#"{"message":"","name":"","color":""}"#)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_is_escaped() {
        let out = sanitize_message("<script>alert('x')</script>");
        assert_eq!(out, "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_whole_message_image() {
        let out = sanitize_message("  https://site.com/pic.jpg \n");
        assert!(out.contains(r#"<img src="https://site.com/pic.jpg""#));
        assert!(out.starts_with(r#"<a href="https://site.com/pic.jpg""#));
    }

    #[test]
    fn test_whole_message_youtube() {
        let out = sanitize_message("https://youtu.be/qYwlqx-JLok");
        assert!(out.starts_with("<iframe "));
        assert!(out.contains(r#"src="https://www.youtube.com/embed/qYwlqx-JLok""#));
    }

    #[test]
    fn test_javascript_url_stays_text() {
        let out = sanitize_message("javascript:alert(1)");
        assert_eq!(out, "javascript:alert(1)");
        assert!(!out.contains("<a "));
    }

    #[test]
    fn test_embedded_urls_are_rendered_in_place() {
        let out = sanitize_message("mira <b>esto</b> https://example.com/a?x=1&y=2 y https://site.com/cat.png!");
        assert!(out.starts_with("mira &lt;b&gt;esto&lt;/b&gt; "));
        assert!(out.contains(
            r#"<a href="https://example.com/a?x=1&amp;y=2" target="_blank" rel="noopener noreferrer">https://example.com/a?x=1&amp;y=2</a>"#
        ));
        // Trailing punctuation is part of the candidate, so this one is a plain link.
        assert!(out.contains(r#"<a href="https://site.com/cat.png!""#));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_embedded_video_and_youtube() {
        let out = sanitize_message("clip https://example.com/v.mp4 and https://www.youtube.com/shorts/qYwlqx-JLok");
        assert!(out.contains(r#"<video controls"#));
        assert!(out.contains(r#"<source src="https://example.com/v.mp4">"#));
        assert!(out.contains(r#"src="https://www.youtube.com/embed/qYwlqx-JLok""#));
    }

    #[test]
    fn test_unparseable_candidate_stays_text() {
        let out = sanitize_message("broken http://[::1 here");
        assert_eq!(out, "broken http://[::1 here");
    }

    #[test]
    fn test_repeated_and_prefix_urls() {
        let out = sanitize_message("https://a.com https://a.com/x https://a.com");
        assert_eq!(out.matches("<a href=\"https://a.com\"").count(), 2);
        assert_eq!(out.matches("<a href=\"https://a.com/x\"").count(), 1);
        assert!(!out.contains("href=\"<a"));
    }

    #[test]
    fn test_v_parameter_off_watch_is_a_plain_link() {
        let out = sanitize_message("https://www.youtube.com/feed?v=qYwlqx-JLok");
        assert!(!out.contains("<iframe"));
        assert!(out.starts_with(r#"<a href="https://www.youtube.com/feed?v=qYwlqx-JLok""#));
    }

    #[test]
    fn test_lone_link_is_not_fast_pathed() {
        let out = sanitize_message("https://example.com/page");
        assert_eq!(
            out,
            r#"<a href="https://example.com/page" target="_blank" rel="noopener noreferrer">https://example.com/page</a>"#
        );
    }

    #[test]
    fn test_image_url_with_text_goes_through_the_scan() {
        let out = sanitize_message("https://site.com/pic.jpg <i>");
        assert!(out.contains(r#"<img src="https://site.com/pic.jpg""#));
        assert!(out.ends_with(" &lt;i&gt;"));
    }

    #[test]
    fn test_empty_and_blank_messages() {
        assert_eq!(sanitize_message(""), "");
        assert_eq!(sanitize_message("   \t\n"), "");
    }

    #[test]
    fn test_looks_suspicious() {
        assert!(looks_suspicious("<script>"));
        assert!(looks_suspicious("< SCRIPT src=x>"));
        assert!(looks_suspicious(r#"<img src=x onerror = "alert(1)">"#));
        assert!(looks_suspicious("JavaScript:alert(1)"));
        assert!(looks_suspicious("data:text/html,hi"));
        assert!(!looks_suspicious("hola, ¿cómo estás?"));
    }

    #[test]
    fn test_envelope_from_message() {
        let out = sanitize_envelope(RawEnvelope::from_message("a < b"));
        assert_eq!(out.message, "a &lt; b");
        assert_eq!(out.name, "Anonymous");
    }

    #[test]
    fn test_envelope_defaults() {
        let out = sanitize_envelope(RawEnvelope::default());
        assert_eq!(out.message, "");
        assert_eq!(out.name, "Anonymous");
        assert_eq!(out.color, "#000000");
    }

    #[test]
    fn test_envelope_non_string_fields() {
        let envelope = parse_envelope(r#"{"message": 42, "name": ["x"], "color": null}"#).unwrap();
        let out = sanitize_envelope(envelope);
        assert_eq!(out.message, "");
        assert_eq!(out.name, "Anonymous");
        assert_eq!(out.color, "#000000");
    }

    #[test]
    fn test_envelope_json_round_trip() {
        let raw = r##"{"name":"A","message":"<script>alert('x')</script>","color":"#123456"}"##;
        let out: SanitizedMessage = serde_json::from_str(&sanitize_envelope_json(raw)).unwrap();
        assert!(out.message.contains("&lt;script&gt;alert"));
        assert_eq!(out.name, "A");
        assert_eq!(out.color, "#123456");
    }

    #[test]
    fn test_envelope_legacy_keys() {
        let raw = r#"{"nombre":"Ana","mensaje":"https://site.com/pic.jpg"}"#;
        let out: SanitizedMessage = serde_json::from_str(&sanitize_envelope_json(raw)).unwrap();
        assert_eq!(out.name, "Ana");
        assert!(out.message.contains("<img src="));
    }

    #[test]
    fn test_malformed_envelope_fails_closed() {
        let defaults = EnvelopeDefaults {
            name: "Invitado".to_string(),
            color: "#ffffff".to_string(),
        };
        for raw in ["<script>alert(1)</script>", "[\"<b>\"]", "\"text\"", "{", ""] {
            let out: SanitizedMessage =
                serde_json::from_str(&sanitize_envelope_json_with(raw, &defaults)).unwrap();
            assert_eq!(out.message, "", "input: {}", raw);
            assert_eq!(out.name, "Invitado");
            assert_eq!(out.color, "#ffffff");
        }
    }

    #[test]
    fn test_parse_envelope_errors() {
        assert!(matches!(parse_envelope("[1, 2]"), Err(SanitizeError::EnvelopeShape)));
        assert!(matches!(parse_envelope("{"), Err(SanitizeError::EnvelopeParse(_))));
    }
}
