//! SessionStatus enum for tracking the lifecycle of assessment sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Returns true if the session still accepts responses and transitions.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Draft | SessionStatus::InProgress)
    }

    /// Returns true if the session is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions (monotonic, no resurrection):
    /// - Draft -> InProgress
    /// - Draft -> Cancelled
    /// - InProgress -> Completed
    /// - InProgress -> Cancelled
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Draft, InProgress) | (Draft, Cancelled) | (InProgress, Completed) | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Draft => "Draft",
            SessionStatus::InProgress => "InProgress",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(SessionStatus::default(), SessionStatus::Draft);
    }

    #[test]
    fn active_states_accept_work() {
        assert!(SessionStatus::Draft.is_active());
        assert!(SessionStatus::InProgress.is_active());
        assert!(!SessionStatus::Completed.is_active());
        assert!(!SessionStatus::Cancelled.is_active());
    }

    #[test]
    fn terminal_states_are_final() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Cancelled.is_terminal());
        assert!(!SessionStatus::InProgress.is_terminal());
    }

    #[test]
    fn valid_transitions_are_allowed() {
        use SessionStatus::*;
        assert!(Draft.can_transition_to(&InProgress));
        assert!(Draft.can_transition_to(&Cancelled));
        assert!(InProgress.can_transition_to(&Completed));
        assert!(InProgress.can_transition_to(&Cancelled));
    }

    #[test]
    fn terminal_states_cannot_be_resurrected() {
        use SessionStatus::*;
        for target in [Draft, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(&target));
            assert!(!Cancelled.can_transition_to(&target));
        }
    }

    #[test]
    fn draft_cannot_jump_to_completed() {
        assert!(!SessionStatus::Draft.can_transition_to(&SessionStatus::Completed));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
