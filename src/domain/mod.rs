//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (output type, timestamps, errors)
//! - `conversation` - Turns, the persisted history record, and model context
//! - `reply` - Structured reply schema, repair, generation states, modality

pub mod conversation;
pub mod foundation;
pub mod reply;
