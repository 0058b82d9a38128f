//! Client configuration types for AURA.
//!
//! `ClientConfig` represents the `config.toml` that points the chat client
//! at a backend and sets the widget's clinic, greeting, and send ordering.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Demo clinic id used by the AURA sandbox backend.
pub const DEFAULT_CLINIC_ID: &str = "00000000-0000-0000-0000-000000000001";

pub const DEFAULT_TITLE: &str = "¡Hola! ¿En qué te puedo ayudar?";

pub const DEFAULT_WELCOME_MESSAGE: &str = "Bienvenido a AURA. Soy tu asistente virtual, \
¿te puedo ayudar con información sobre nuestros servicios?";

/// How concurrent `send_message` calls are ordered in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOrdering {
    /// Sends run independently; bot replies land in completion order.
    Concurrent,
    /// One exchange at a time; the transcript strictly alternates.
    Serialized,
}

impl Default for SendOrdering {
    fn default() -> Self {
        SendOrdering::Concurrent
    }
}

impl fmt::Display for SendOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOrdering::Concurrent => write!(f, "concurrent"),
            SendOrdering::Serialized => write!(f, "serialized"),
        }
    }
}

impl FromStr for SendOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concurrent" => Ok(SendOrdering::Concurrent),
            "serialized" => Ok(SendOrdering::Serialized),
            other => Err(format!("invalid send ordering: '{other}'")),
        }
    }
}

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.aura/config.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Clinic the widget is embedded for.
    #[serde(default = "default_clinic_id")]
    pub clinic_id: String,

    /// Header shown above the conversation.
    #[serde(default = "default_title")]
    pub title: String,

    /// Greeting seeded into every new transcript. Never fetched from the server.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Per-request timeout. `None` waits forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub send_ordering: SendOrdering,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_clinic_id() -> String {
    DEFAULT_CLINIC_ID.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_welcome_message() -> String {
    DEFAULT_WELCOME_MESSAGE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            clinic_id: default_clinic_id(),
            title: default_title(),
            welcome_message: default_welcome_message(),
            request_timeout_secs: None,
            send_ordering: SendOrdering::default(),
        }
    }
}
