//! Transition rules for lifecycle enums.

use super::ValidationError;

/// A lifecycle enum with an explicit set of allowed transitions.
///
/// Implementors list the edges; checked transitions and terminal detection
/// come from the provided methods.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the edge exists, otherwise a `state_transition`
    /// validation error naming both states.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "state_transition",
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// A state with no outgoing edges.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
