//! Chat session client and backend trait definitions for AURA.
//!
//! This crate defines the `ChatBackend` port that the infrastructure layer
//! implements, and the `ChatSessionClient` that drives one visitor session
//! against it. It depends only on `aura-types` -- never on `aura-infra` or
//! any HTTP crate.

pub mod backend;
pub mod chat;
