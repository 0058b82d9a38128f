//! NboClient -- next-best-offer recommendations and feedback.
//!
//! Thin adapter over `POST /nbo/recommend` and `POST /nbo/feedback`. Ranking
//! happens server-side; the client only validates input and relays results.

use tracing::{debug, warn};

use aura_types::config::ClientConfig;
use aura_types::error::{BackendError, RequestError, require};
use aura_types::nbo::{Feedback, FeedbackAction, RecommendRequest, RecommendResponse};

use crate::http::ApiClient;

pub struct NboClient {
    api: ApiClient,
}

impl NboClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    /// Ask for ranked services for `conversation_id`.
    ///
    /// No message history is sent; the server works from the conversation id
    /// and the stated intent.
    pub async fn recommend(
        &self,
        conversation_id: &str,
        contact_name: &str,
        current_intent: &str,
    ) -> Result<RecommendResponse, RequestError> {
        require("conversation id", conversation_id)?;
        require("contact name", contact_name)?;
        require("intent", current_intent)?;

        let body = RecommendRequest {
            conversation_id: conversation_id.to_string(),
            contact_name: contact_name.to_string(),
            current_intent: current_intent.to_string(),
            message_history: Vec::new(),
        };
        let resp: RecommendResponse = self
            .api
            .post_json("/nbo/recommend", &body)
            .await
            .inspect_err(|e| warn!(error = %e, "NBO recommend failed"))?;

        debug!(
            conversation_id = %resp.context.conversation_id,
            recommendations = resp.recommendations.len(),
            latency_ms = resp.latency_ms,
            "NBO recommendations received"
        );
        Ok(resp)
    }

    /// Record what the contact did with the recommendation `service_id`.
    pub async fn feedback(
        &self,
        service_id: &str,
        conversation_id: &str,
        action: FeedbackAction,
    ) -> Result<(), RequestError> {
        require("service id", service_id)?;
        require("conversation id", conversation_id)?;

        let body = Feedback::new(service_id, conversation_id, action);
        self.api
            .post_for_status("/nbo/feedback", &body)
            .await
            .inspect_err(|e| warn!(error = %e, "NBO feedback failed"))?;

        debug!(service_id, %action, "NBO feedback recorded");
        Ok(())
    }
}
