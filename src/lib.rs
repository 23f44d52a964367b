//! Lyra - Conversational Assistant Gateway
//!
//! Turns user messages into structured replies (`content`, `emotion`,
//! `output_type`) from a chat-completion model, repairs or regenerates
//! malformed model output, falls back to a calm apology when the model is
//! unreachable, and synthesizes voice replies when a speech backend is
//! available.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
