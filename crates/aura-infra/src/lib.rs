//! Infrastructure layer for AURA.
//!
//! Contains the implementations of the ports defined in `aura-core`: the
//! reqwest-backed `HttpChatBackend`, the one-shot `SimulatorClient`,
//! `NboClient` and `WhatsAppClient`, and the config/data-directory loaders.

pub mod config;
pub mod http;
pub mod nbo;
pub mod simulator;
pub mod whatsapp;
