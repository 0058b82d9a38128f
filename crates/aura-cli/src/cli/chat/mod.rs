//! Interactive terminal chat for AURA.
//!
//! This module implements the chat loop around one `ChatSessionClient`:
//! visitor prompt, welcome banner, slash commands, and a typing spinner while
//! a reply is pending. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
