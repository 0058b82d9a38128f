//! HttpChatBackend -- concrete [`ChatBackend`] for the AURA HTTP API.
//!
//! Talks to `POST /chat/session` and `POST /chat/message` with JSON bodies.
//! No retries, no idempotency keys: one call, one request.

use aura_core::backend::ChatBackend;
use aura_types::chat::{BotReply, ChatSession, OutgoingMessage, StartSessionRequest};
use aura_types::config::ClientConfig;
use aura_types::error::BackendError;

use super::api::ApiClient;
use super::types::{CreateSessionResponse, HealthResponse, SendMessageResponse};

/// AURA HTTP chat backend.
#[derive(Clone)]
pub struct HttpChatBackend {
    api: ApiClient,
}

impl HttpChatBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Call `GET /health`. Returns the server's `ok` flag.
    pub async fn health(&self) -> Result<bool, BackendError> {
        let resp: HealthResponse = self.api.get_json("/health").await?;
        Ok(resp.ok)
    }
}

impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "aura-http"
    }

    async fn create_session(
        &self,
        request: &StartSessionRequest,
    ) -> Result<ChatSession, BackendError> {
        let resp: CreateSessionResponse = self.api.post_json("/chat/session", request).await?;
        Ok(resp.session)
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<BotReply, BackendError> {
        let resp: SendMessageResponse = self.api.post_json("/chat/message", message).await?;
        Ok(resp.bot_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use aura_core::chat::client::{ChatSessionClient, ClientSettings, ClientState, SendOutcome};
    use aura_types::chat::{Sender, SessionStatus, VisitorInfo};
    use aura_types::error::ChatError;
    use serde_json::json;

    use crate::http::test_server;

    fn visitor(email: Option<&str>) -> VisitorInfo {
        VisitorInfo {
            visitor_name: "Ana".to_string(),
            visitor_email: email.map(str::to_string),
            source_url: "http://localhost:3000/chat-widget".to_string(),
            user_agent: "Mozilla/5.0 (aura-tests)".to_string(),
        }
    }

    fn backend(base_url: &str) -> HttpChatBackend {
        HttpChatBackend::new(ApiClient::new(base_url, None).unwrap())
    }

    #[tokio::test]
    async fn create_session_posts_expected_body() {
        let server = test_server::spawn().await;
        let backend = backend(&server.base_url);

        let request = StartSessionRequest::new("clinic-1", visitor(None));
        let session = backend.create_session(&request).await.unwrap();
        assert_eq!(session.id, "sess-http-1");
        assert_eq!(session.clinic_id, "clinic-1");

        let bodies = server.recorded.bodies_for("/chat/session");
        assert_eq!(
            bodies,
            vec![json!({
                "clinic_id": "clinic-1",
                "visitor_name": "Ana",
                "visitor_email": null,
                "source_url": "http://localhost:3000/chat-widget",
                "user_agent": "Mozilla/5.0 (aura-tests)"
            })]
        );
    }

    #[tokio::test]
    async fn send_message_posts_visitor_sender() {
        let server = test_server::spawn().await;
        let backend = backend(&server.base_url);

        let reply = backend
            .send_message(&OutgoingMessage::from_visitor("sess-http-1", "hola"))
            .await
            .unwrap();
        assert_eq!(reply.message, "Recibido: hola");
        assert_eq!(reply.timestamp, "2025-01-01T10:00:01Z");

        let bodies = server.recorded.bodies_for("/chat/message");
        assert_eq!(
            bodies,
            vec![json!({"session_id": "sess-http-1", "message": "hola", "sender": "visitor"})]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = test_server::spawn().await;
        let backend = backend(&server.base_url);

        let err = backend
            .send_message(&OutgoingMessage::from_visitor("s", "fail"))
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "classifier crashed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_payload_is_deserialization_error() {
        let server = test_server::spawn().await;
        let backend = backend(&server.base_url);

        let err = backend
            .send_message(&OutgoingMessage::from_visitor("s", "garbled"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Deserialization(_)));
    }

    #[tokio::test]
    async fn configured_timeout_fires() {
        let server = test_server::spawn().await;
        let api = ApiClient::new(&server.base_url, Some(Duration::from_millis(300))).unwrap();
        let backend = HttpChatBackend::new(api);

        let err = backend
            .send_message(&OutgoingMessage::from_visitor("s", "slow"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Timeout));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = test_server::spawn().await;
        assert!(backend(&server.base_url).health().await.unwrap());
    }

    #[tokio::test]
    async fn client_over_http_full_exchange() {
        let server = test_server::spawn().await;
        let client = ChatSessionClient::new(backend(&server.base_url), ClientSettings::default());

        client
            .start_session(visitor(Some("ana@example.com")))
            .await
            .unwrap();
        assert_eq!(client.state(), ClientState::SessionActive);

        let outcome = client.send_message("quiero agendar").await;
        assert_eq!(outcome.reply().unwrap().text, "Recibido: quiero agendar");

        let outcome = client.send_message("fail").await;
        assert!(matches!(outcome, SendOutcome::Failed(BackendError::Status { status: 500, .. })));

        let senders: Vec<Sender> = client.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::Bot, Sender::Visitor, Sender::Bot, Sender::Visitor]
        );
        assert_eq!(client.last_message().unwrap().text, "fail");

        let session_bodies = server.recorded.bodies_for("/chat/session");
        assert_eq!(session_bodies[0]["visitor_email"], "ana@example.com");
    }

    #[tokio::test]
    async fn start_session_accepts_sparse_server_session() {
        let server = test_server::spawn_sparse_session().await;
        let client = ChatSessionClient::new(backend(&server.base_url), ClientSettings::default());

        let session = client.start_session(visitor(None)).await.unwrap();
        assert_eq!(session.id, "sess-sparse-1");
        assert_eq!(session.status, SessionStatus::Unknown);
        assert_eq!(session.message_count, 0);
        assert_eq!(session.clinic_id, ClientSettings::default().clinic_id);
        assert_eq!(session.visitor_name.as_deref(), Some("Ana"));
        assert_eq!(client.state(), ClientState::SessionActive);
        assert_eq!(client.transcript_len(), 1);
    }

    #[tokio::test]
    async fn client_stays_without_session_when_server_down() {
        let server = test_server::spawn_unavailable().await;
        let client = ChatSessionClient::new(backend(&server.base_url), ClientSettings::default());

        let err = client.start_session(visitor(None)).await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Backend(BackendError::Status { status: 503, .. })
        ));
        assert_eq!(client.state(), ClientState::NoSession);
        assert_eq!(client.transcript_len(), 0);

        // Sends are still no-ops.
        client.send_message("hola").await;
        assert!(server.recorded.bodies_for("/chat/message").is_empty());
    }
}
