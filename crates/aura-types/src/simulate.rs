//! Payloads for the demo simulator endpoints.
//!
//! `POST /sim/message` classifies a single inbound message and answers it
//! without opening a widget session. `GET /simulate` replays the server's
//! canned demo conversation and returns every result at once. Both are
//! stateless from the client's side.

use serde::{Deserialize, Serialize};

/// Body of `POST /sim/message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMessage {
    pub contact_name: String,
    pub text: String,
    pub conversation_id: Option<String>,
}

/// Reply from `POST /sim/message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub conversation_id: String,
    pub intent: String,
    pub response: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply from `GET /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationBatch {
    #[serde(default)]
    pub results: Vec<SimulationResult>,
}
