//! Reply module - schema, repair, generation states, fallback and modality.

mod fallback;
mod generation_state;
mod modality;
mod repair;
mod schema;

pub use fallback::{fallback_reply, Locale, FALLBACK_EMOTION};
pub use generation_state::GenerationState;
pub use modality::{decide, ModalityDecision, ResolvedReply};
pub use repair::{repair, UnrecoverableOutput};
pub use schema::{validate, SchemaViolation, StructuredReply};
