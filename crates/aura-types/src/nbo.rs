//! Payloads for the next-best-offer endpoints.
//!
//! `POST /nbo/recommend` ranks clinic services for a conversation;
//! `POST /nbo/feedback` records what the contact did with one of them.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Body of `POST /nbo/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub conversation_id: String,
    pub contact_name: String,
    pub current_intent: String,
    #[serde(default)]
    pub message_history: Vec<String>,
}

/// One ranked service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub service_id: String,
    pub service_name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// Between 0.0 and 1.0.
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
}

impl Recommendation {
    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

/// What the server knew about the conversation when ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendContext {
    pub intent: String,
    pub conversation_id: String,
    #[serde(default)]
    pub message_count: u32,
}

/// Reply from `POST /nbo/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub context: RecommendContext,
    #[serde(default)]
    pub latency_ms: u64,
}

/// What the contact did with a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Clicked,
    Booked,
    Rejected,
}

impl FeedbackAction {
    /// Score sent alongside the action: booked 5, clicked 3, rejected 1.
    pub fn score(self) -> u8 {
        match self {
            FeedbackAction::Booked => 5,
            FeedbackAction::Clicked => 3,
            FeedbackAction::Rejected => 1,
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackAction::Clicked => write!(f, "clicked"),
            FeedbackAction::Booked => write!(f, "booked"),
            FeedbackAction::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for FeedbackAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clicked" => Ok(FeedbackAction::Clicked),
            "booked" => Ok(FeedbackAction::Booked),
            "rejected" => Ok(FeedbackAction::Rejected),
            other => Err(format!("invalid feedback action: '{other}'")),
        }
    }
}

/// Body of `POST /nbo/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// The `service_id` of the recommendation.
    pub recommendation_id: String,
    pub conversation_id: String,
    pub action: FeedbackAction,
    pub feedback_score: u8,
}

impl Feedback {
    pub fn new(
        recommendation_id: impl Into<String>,
        conversation_id: impl Into<String>,
        action: FeedbackAction,
    ) -> Self {
        Self {
            recommendation_id: recommendation_id.into(),
            conversation_id: conversation_id.into(),
            action,
            feedback_score: action.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_scores_follow_action() {
        let fb = Feedback::new("svc-axilas", "conv-1", FeedbackAction::Booked);
        assert_eq!(fb.feedback_score, 5);
        assert_eq!(FeedbackAction::Clicked.score(), 3);
        assert_eq!(FeedbackAction::Rejected.score(), 1);

        let json = serde_json::to_value(&fb).unwrap();
        assert_eq!(json["action"], "booked");
        assert_eq!(json["recommendation_id"], "svc-axilas");
    }

    #[test]
    fn test_feedback_action_parse() {
        assert_eq!("Booked".parse::<FeedbackAction>().unwrap(), FeedbackAction::Booked);
        assert!("ignored".parse::<FeedbackAction>().is_err());
    }

    #[test]
    fn test_recommend_response_parse() {
        let json = r#"{
            "recommendations": [{
                "service_id": "svc-1",
                "service_name": "Depilación láser axilas",
                "price": 29990,
                "description": "20 min",
                "confidence": 0.874,
                "reason": "Preguntó por precios"
            }],
            "context": {"intent": "precios", "conversation_id": "conv-1", "message_count": 3},
            "latency_ms": 41
        }"#;
        let resp: RecommendResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.recommendations[0].price, 29990.0);
        assert_eq!(resp.recommendations[0].confidence_percent(), 87);
        assert_eq!(resp.context.message_count, 3);
    }

    #[test]
    fn test_recommend_request_sends_empty_history() {
        let req = RecommendRequest {
            conversation_id: "conv-1".to_string(),
            contact_name: "Ana".to_string(),
            current_intent: "precios".to_string(),
            message_history: Vec::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message_history"], serde_json::json!([]));
    }
}
