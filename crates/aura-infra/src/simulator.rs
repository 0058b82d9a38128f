//! SimulatorClient -- calls to the demo simulator.
//!
//! `simulate` classifies a single message (agendar / precios / faq) through
//! `POST /sim/message`; `run_demo` replays the server's canned conversation
//! through `GET /simulate`. Neither opens a widget session or keeps state on
//! the client side.

use tracing::{debug, warn};

use aura_types::config::ClientConfig;
use aura_types::error::{BackendError, RequestError, require};
use aura_types::simulate::{SimulatedMessage, SimulationBatch, SimulationResult};

use crate::http::ApiClient;

pub struct SimulatorClient {
    api: ApiClient,
}

impl SimulatorClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    /// Send one message as `contact_name`, optionally continuing a conversation.
    pub async fn simulate(
        &self,
        contact_name: &str,
        text: &str,
        conversation_id: Option<String>,
    ) -> Result<SimulationResult, RequestError> {
        require("contact name", contact_name)?;
        require("message text", text)?;

        let body = SimulatedMessage {
            contact_name: contact_name.to_string(),
            text: text.to_string(),
            conversation_id,
        };
        let result: SimulationResult = self
            .api
            .post_json("/sim/message", &body)
            .await
            .inspect_err(|e| warn!(error = %e, "Simulator request failed"))?;

        debug!(
            conversation_id = %result.conversation_id,
            intent = %result.intent,
            latency_ms = result.latency_ms,
            "Simulator replied"
        );
        Ok(result)
    }

    /// Run the server-side demo conversation and return every result in order.
    pub async fn run_demo(&self) -> Result<Vec<SimulationResult>, RequestError> {
        let batch: SimulationBatch = self
            .api
            .get_json("/simulate")
            .await
            .inspect_err(|e| warn!(error = %e, "Simulator demo failed"))?;

        debug!(results = batch.results.len(), "Simulator demo finished");
        Ok(batch.results)
    }
}
