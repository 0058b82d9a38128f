//! WhatsAppClient -- outbound text messages through `POST /whatsapp/send`.
//!
//! Success is the HTTP status alone; the reply body is not inspected.

use tracing::{info, warn};

use aura_types::config::ClientConfig;
use aura_types::error::{BackendError, RequestError, require};
use aura_types::whatsapp::WhatsAppMessage;

use crate::http::ApiClient;

pub struct WhatsAppClient {
    api: ApiClient,
}

impl WhatsAppClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    /// Send `message` as plain text to `phone_number`.
    pub async fn send_text(&self, phone_number: &str, message: &str) -> Result<(), RequestError> {
        require("phone number", phone_number)?;
        require("message", message)?;

        let body = WhatsAppMessage::text(phone_number, message);
        self.api
            .post_for_status("/whatsapp/send", &body)
            .await
            .inspect_err(|e| warn!(error = %e, "WhatsApp send failed"))?;

        info!(phone_number, "WhatsApp message sent");
        Ok(())
    }
}
