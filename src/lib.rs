use models::EnvelopeDefaults;

/// Shared, read-only state handed to the HTTP handlers.
pub struct AppState {
    pub defaults: EnvelopeDefaults,
}

pub mod config;
pub mod helper;
pub mod models;
pub mod routes;

pub use helper::escape_helpers::escape_html;
pub use helper::markup_helpers::render_markup;
pub use helper::media_helpers::classify_media;
pub use helper::sanitization_helpers::{
    looks_suspicious, sanitize_envelope, sanitize_envelope_json, sanitize_envelope_json_with,
    sanitize_envelope_with, sanitize_message,
};
pub use helper::url_helpers::{check_url, is_safe_url};
pub use helper::youtube_helpers::extract_youtube_id;
pub use models::{MediaKind, RawEnvelope, SanitizedMessage};
