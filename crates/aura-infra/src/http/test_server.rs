//! In-process stand-in for the AURA API, served by axum on an ephemeral port.
//!
//! Records every request body so tests can assert on the wire format.
//! `"fail"` as a chat message yields HTTP 500; `"slow"` stalls for two seconds.
//! NBO feedback for conversation `"missing"` yields 404 and a WhatsApp send
//! to `"000"` yields 400.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Clone, Default)]
pub(crate) struct Recorded {
    pub bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    pub fn bodies_for(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn record(&self, path: &str, body: &Value) {
        self.bodies
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));
    }
}

pub(crate) struct TestServer {
    pub base_url: String,
    pub recorded: Recorded,
}

/// How `/chat/session` answers.
#[derive(Clone, Copy)]
enum SessionMode {
    Normal,
    Unavailable,
    Sparse,
}

/// Start a server that answers like the AURA API.
pub(crate) async fn spawn() -> TestServer {
    spawn_with(SessionMode::Normal).await
}

/// Start a server whose `/chat/session` and `/simulate` always answer 503.
pub(crate) async fn spawn_unavailable() -> TestServer {
    spawn_with(SessionMode::Unavailable).await
}

/// Start a server whose `/chat/session` returns an id with `null` and
/// unrecognized values in every other field.
pub(crate) async fn spawn_sparse_session() -> TestServer {
    spawn_with(SessionMode::Sparse).await
}

async fn spawn_with(mode: SessionMode) -> TestServer {
    let recorded = Recorded::default();

    let session_route = match mode {
        SessionMode::Normal => post(create_session),
        SessionMode::Unavailable => post(session_down),
        SessionMode::Sparse => post(create_sparse_session),
    };
    let demo_route = match mode {
        SessionMode::Unavailable => get(demo_down),
        SessionMode::Normal | SessionMode::Sparse => get(sim_demo),
    };
    let app = Router::new()
        .route("/health", get(health))
        .route("/chat/session", session_route)
        .route("/chat/message", post(chat_message))
        .route("/sim/message", post(sim_message))
        .route("/simulate", demo_route)
        .route("/nbo/recommend", post(nbo_recommend))
        .route("/nbo/feedback", post(nbo_feedback))
        .route("/whatsapp/send", post(whatsapp_send))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        recorded,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn create_session(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.record("/chat/session", &body);
    Json(json!({
        "session": {
            "id": "sess-http-1",
            "clinic_id": body["clinic_id"],
            "visitor_name": body["visitor_name"],
            "visitor_email": body["visitor_email"],
            "status": "active",
            "created_at": "2025-01-01T10:00:00Z",
            "last_activity": "2025-01-01T10:00:00Z",
            "message_count": 0
        }
    }))
}

async fn create_sparse_session(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.record("/chat/session", &body);
    Json(json!({
        "session": {
            "id": "sess-sparse-1",
            "clinic_id": null,
            "visitor_name": null,
            "status": "pending",
            "created_at": null,
            "message_count": null
        }
    }))
}

async fn session_down(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
    recorded.record("/chat/session", &body);
    (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
}

async fn chat_message(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
    recorded.record("/chat/message", &body);
    let text = body["message"].as_str().unwrap_or_default().to_string();

    match text.as_str() {
        "fail" => (StatusCode::INTERNAL_SERVER_ERROR, "classifier crashed").into_response(),
        "garbled" => Json(json!({ "unexpected": true })).into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(reply(&text)).into_response()
        }
        _ => Json(reply(&text)).into_response(),
    }
}

fn reply(text: &str) -> Value {
    json!({
        "bot_response": {
            "message": format!("Recibido: {text}"),
            "timestamp": "2025-01-01T10:00:01Z"
        }
    })
}

async fn sim_message(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.record("/sim/message", &body);
    let conversation_id = body["conversation_id"]
        .as_str()
        .unwrap_or("demo-conv-001")
        .to_string();
    Json(json!({
        "conversation_id": conversation_id,
        "intent": "precios",
        "response": "Depilación láser axilas $29.990, duración 20 min.",
        "latency_ms": 12
    }))
}

fn sim_result(intent: &str, response: &str, latency_ms: u64) -> Value {
    json!({
        "conversation_id": "demo-conv-001",
        "intent": intent,
        "response": response,
        "latency_ms": latency_ms
    })
}

async fn sim_demo() -> Json<Value> {
    Json(json!({
        "results": [
            sim_result("precios", "Depilación láser axilas $29.990, duración 20 min.", 8),
            sim_result("agendar", "Tengo estos cupos: hoy 18:00 o mañana 11:30.", 11),
            sim_result("faq", "Atendemos de lunes a sábado.", 5)
        ]
    }))
}

async fn demo_down() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "simulator offline").into_response()
}

async fn nbo_recommend(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.record("/nbo/recommend", &body);
    Json(json!({
        "recommendations": [
            {
                "service_id": "svc-axilas",
                "service_name": "Depilación láser axilas",
                "price": 29990,
                "description": "Sesión de 20 minutos",
                "confidence": 0.92,
                "reason": "Consultó precios de depilación"
            },
            {
                "service_id": "svc-bozo",
                "service_name": "Depilación láser bozo",
                "price": 19990,
                "description": "Promo 2x1 con axilas",
                "confidence": 0.64,
                "reason": "Complemento frecuente"
            }
        ],
        "context": {
            "intent": body["current_intent"],
            "conversation_id": body["conversation_id"],
            "message_count": 3
        },
        "latency_ms": 17
    }))
}

async fn nbo_feedback(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
    recorded.record("/nbo/feedback", &body);
    if body["conversation_id"] == "missing" {
        return (StatusCode::NOT_FOUND, "conversation not found").into_response();
    }
    Json(json!({ "ok": true })).into_response()
}

async fn whatsapp_send(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
    recorded.record("/whatsapp/send", &body);
    if body["phone_number"] == "000" {
        return (StatusCode::BAD_REQUEST, "invalid phone number").into_response();
    }
    // Empty body: only the status matters.
    StatusCode::OK.into_response()
}
