//! Response envelopes of the AURA HTTP API.
//!
//! Request bodies are the domain types in `aura_types::chat` serialized
//! directly; only the wrapping objects of the replies live here.

use serde::{Deserialize, Serialize};

use aura_types::chat::{BotReply, ChatSession};

/// Reply of `POST /chat/session`. Only `session.id` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session: ChatSession,
}

/// Reply of `POST /chat/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub bot_response: BotReply,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}
