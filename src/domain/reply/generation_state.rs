//! Reply generation state machine.
//!
//! ```text
//! Requested ─► AwaitingModel ─► Validating ─► Done
//!                  │  ▲              │
//!                  │  │              ├─► Repairing ─► Done
//!                  │  │              │       │
//!                  │  └── Retrying ◄─┼───────┘
//!                  │                 │
//!                  └──────────────► Fallback ◄── (retry output still invalid)
//! ```

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Where a single reply-generation run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    /// Context assembled, nothing sent yet.
    Requested,
    /// One model invocation in flight.
    AwaitingModel,
    /// Raw model text is being checked against the schema.
    Validating,
    /// Validation failed; single-pass repair in progress.
    Repairing,
    /// Repair failed; the one regenerate call is about to be made.
    Retrying,
    /// A validated reply was produced.
    Done,
    /// The apology sentinel was produced.
    Fallback,
}

impl StateMachine for GenerationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GenerationState::*;
        matches!(
            (self, target),
            (Requested, AwaitingModel)
                | (AwaitingModel, Validating)
                | (AwaitingModel, Fallback)
                | (Validating, Done)
                | (Validating, Repairing)
                | (Validating, Fallback)
                | (Repairing, Done)
                | (Repairing, Retrying)
                | (Retrying, AwaitingModel)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GenerationState::*;
        match self {
            Requested => vec![AwaitingModel],
            AwaitingModel => vec![Validating, Fallback],
            Validating => vec![Done, Repairing, Fallback],
            Repairing => vec![Done, Retrying],
            Retrying => vec![AwaitingModel],
            Done | Fallback => vec![],
        }
    }
}
