//! Shared domain types for the AURA chat client.
//!
//! This crate contains the types used across the workspace: chat sessions,
//! transcript messages, simulator, NBO and WhatsApp payloads, client
//! configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod nbo;
pub mod simulate;
pub mod whatsapp;
