//! ChatBackend trait definition.
//!
//! This is the seam between the chat client and whatever serves
//! `/chat/session` and `/chat/message`. Uses RPITIT, like the other
//! async traits in the workspace.

use aura_types::chat::{BotReply, ChatSession, OutgoingMessage, StartSessionRequest};
use aura_types::error::BackendError;

/// Trait for chat backends (the AURA HTTP API, test doubles).
///
/// Implementations live in aura-infra (e.g., `HttpChatBackend`).
/// A call either succeeds or fails as a whole; implementations must not
/// retry on their own.
pub trait ChatBackend: Send + Sync {
    /// Human-readable backend name used in logs.
    fn name(&self) -> &str;

    /// Create a session for a visitor. The returned session must carry the
    /// server-assigned id.
    fn create_session(
        &self,
        request: &StartSessionRequest,
    ) -> impl std::future::Future<Output = Result<ChatSession, BackendError>> + Send;

    /// Deliver one visitor message and receive the bot's reply.
    fn send_message(
        &self,
        message: &OutgoingMessage,
    ) -> impl std::future::Future<Output = Result<BotReply, BackendError>> + Send;
}
