//! State machine trait for lifecycle enums.
//!
//! Gives every state enum the same checked-transition surface, so callers move
//! between states through `transition_to` instead of plain assignment.

use super::ValidationError;

/// Trait for enums that represent a state machine.
///
/// Implementors list their legal edges; checked transitions and terminal
/// detection come for free.
///
/// ```ignore
/// let next = GenerationState::Validating.transition_to(GenerationState::Repairing)?;
/// assert!(!next.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to target is a legal edge.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all legal target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs a checked transition.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Terminal states have no outgoing edges.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
