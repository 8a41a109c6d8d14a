pub mod errors;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_SENDER_NAME: &str = "Anonymous";
pub const DEFAULT_SENDER_COLOR: &str = "#000000";

/// What a safety-checked URL points at. The set of variants is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    YouTube,
    GenericLink,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::YouTube => "youtube",
            MediaKind::GenericLink => "generic_link",
        };
        f.write_str(label)
    }
}

/// An envelope exactly as the client sent it. Every field is untrusted and may hold
/// any JSON value; the legacy Spanish keys are still accepted.
#[derive(Debug, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default, alias = "mensaje")]
    pub message: Option<Value>,
    #[serde(default, alias = "nombre")]
    pub name: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
}

impl RawEnvelope {
    pub fn from_message(message: &str) -> Self {
        RawEnvelope {
            message: Some(Value::String(message.to_string())),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedMessage {
    pub message: String,
    pub name: String,
    pub color: String,
}

/// Values used when an envelope is missing `name` or `color`, or carries a non-string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeDefaults {
    pub name: String,
    pub color: String,
}

impl Default for EnvelopeDefaults {
    fn default() -> Self {
        EnvelopeDefaults {
            name: DEFAULT_SENDER_NAME.to_string(),
            color: DEFAULT_SENDER_COLOR.to_string(),
        }
    }
}
