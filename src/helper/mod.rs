pub mod escape_helpers;
pub mod markup_helpers;
pub mod media_helpers;
pub mod sanitization_helpers;
pub mod url_helpers;
pub mod youtube_helpers;
