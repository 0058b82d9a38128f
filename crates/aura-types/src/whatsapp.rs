//! Payload for sending an outbound WhatsApp message (`POST /whatsapp/send`).

use serde::{Deserialize, Serialize};

/// Body of `POST /whatsapp/send`. Only plain text messages are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppMessage {
    pub phone_number: String,
    pub message: String,
    pub message_type: String,
}

impl WhatsAppMessage {
    pub fn text(phone_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            message: message.into(),
            message_type: "text".to_string(),
        }
    }
}
