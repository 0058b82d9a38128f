//! HTTP adapters for the AURA backend API.
//!
//! `ApiClient` is the shared JSON-over-HTTP plumbing; `HttpChatBackend`
//! implements [`aura_core::backend::ChatBackend`] on top of it.

pub mod api;
pub mod backend;
pub mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use api::ApiClient;
pub use backend::HttpChatBackend;
