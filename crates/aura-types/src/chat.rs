//! Chat session, message, and request types for the AURA chat client.
//!
//! These types model one visitor conversation with the clinic bot: the
//! server-tracked session, the transcript messages, and the payloads the
//! client exchanges with the backend.

use chrono::{SecondsFormat, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Id given to the synthetic welcome message seeded at session start.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Server-side lifecycle status of a chat session.
///
/// The client only ever observes `Active`; `Closed` and `Transferred` are
/// set by the backend and never drive a client-side transition. Any other
/// status string from the server deserializes as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
    Transferred,
    Unknown,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Closed => write!(f, "closed"),
            SessionStatus::Transferred => write!(f, "transferred"),
            SessionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(SessionStatus::Active),
            "closed" => Ok(SessionStatus::Closed),
            "transferred" => Ok(SessionStatus::Transferred),
            "unknown" => Ok(SessionStatus::Unknown),
            other => Err(format!("invalid session status: '{other}'")),
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Active
    }
}

impl<'de> Deserialize<'de> for SessionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(SessionStatus::Unknown))
    }
}

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Visitor,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Visitor => write!(f, "visitor"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visitor" => Ok(Sender::Visitor),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A chat session as returned by `POST /chat/session`.
///
/// Only `id` is required from the server. Every other field is read
/// leniently: missing, `null`, or ill-typed values fall back to the default
/// and are then filled from the start request (see [`ChatSession::fill_from`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub clinic_id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub visitor_name: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub visitor_email: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub user_agent: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "or_default")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub last_activity: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub message_count: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueOrAny<T> {
    Value(T),
    Any(IgnoredAny),
}

/// Deserialize `T`, yielding `T::default()` for `null` or a value of the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Option::<ValueOrAny<T>>::deserialize(deserializer)? {
        Some(ValueOrAny::Value(value)) => value,
        Some(ValueOrAny::Any(_)) | None => T::default(),
    })
}

impl ChatSession {
    /// Fill fields the server left out with the values the client sent.
    pub fn fill_from(&mut self, request: &StartSessionRequest) {
        if self.clinic_id.is_empty() {
            self.clinic_id = request.clinic_id.clone();
        }
        if self.visitor_name.is_none() {
            self.visitor_name = Some(request.visitor_name.clone());
        }
        if self.visitor_email.is_none() {
            self.visitor_email = request.visitor_email.clone();
        }
        if self.source_url.is_none() {
            self.source_url = Some(request.source_url.clone());
        }
        if self.user_agent.is_none() {
            self.user_agent = Some(request.user_agent.clone());
        }
    }
}

/// A single message in the in-memory transcript.
///
/// The text travels as `message` on the wire, matching the backend's field
/// name. Timestamps are ISO-8601 strings and are kept verbatim when they
/// come from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    #[serde(rename = "message")]
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl ChatMessage {
    /// Outgoing visitor message with a fresh client-side id.
    pub fn visitor(session_id: &str, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            session_id: session_id.to_string(),
            text: text.into(),
            sender: Sender::Visitor,
            timestamp: now_iso8601(),
        }
    }

    /// The synthetic bot greeting seeded when a session starts.
    pub fn welcome(session_id: &str, text: impl Into<String>) -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_string(),
            session_id: session_id.to_string(),
            text: text.into(),
            sender: Sender::Bot,
            timestamp: now_iso8601(),
        }
    }

    /// Bot message built from a backend reply.
    pub fn bot(session_id: &str, reply: BotReply) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            session_id: session_id.to_string(),
            text: reply.message,
            sender: Sender::Bot,
            timestamp: reply.timestamp,
        }
    }
}

/// Visitor details collected by the embedding shell before a session starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitorInfo {
    pub visitor_name: String,
    pub visitor_email: Option<String>,
    pub source_url: String,
    pub user_agent: String,
}

/// Body of `POST /chat/session`.
///
/// `visitor_email` serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub clinic_id: String,
    pub visitor_name: String,
    pub visitor_email: Option<String>,
    pub source_url: String,
    pub user_agent: String,
}

impl StartSessionRequest {
    /// Build a start request for `clinic_id`. An empty email becomes `None`;
    /// any other value, whitespace included, is sent as typed.
    pub fn new(clinic_id: &str, visitor: VisitorInfo) -> Self {
        let visitor_email = visitor.visitor_email.filter(|email| !email.is_empty());
        Self {
            clinic_id: clinic_id.to_string(),
            visitor_name: visitor.visitor_name,
            visitor_email,
            source_url: visitor.source_url,
            user_agent: visitor.user_agent,
        }
    }
}

/// Body of `POST /chat/message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub session_id: String,
    pub message: String,
    pub sender: Sender,
}

impl OutgoingMessage {
    pub fn from_visitor(session_id: &str, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.to_string(),
            message: message.into(),
            sender: Sender::Visitor,
        }
    }
}

/// The `bot_response` object of a `POST /chat/message` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotReply {
    pub message: String,
    pub timestamp: String,
}

/// Current UTC time in the `toISOString()` shape: millisecond precision, `Z` suffix.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
