//! Visitor chat session lifecycle and transcript.
//!
//! `ChatSessionClient` owns one session against a `ChatBackend` and keeps an
//! append-only `Transcript` of the exchange.

pub mod client;
pub mod transcript;
