use crate::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Rendered,
    Alerted,
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    ResultRendered,
    ApplicationError,
    TransportFailed,
    MalformedResponse,
}

/// Phases of a single submission. One instance per click; it never returns
/// to `Idle`.
#[derive(Debug)]
pub struct SubmissionStateMachine {
    state: SubmissionState,
}

impl Default for SubmissionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionStateMachine {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn current_state(&self) -> SubmissionState {
        self.state
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> Result<()> {
        use SubmissionEvent as E;
        use SubmissionState as S;

        let new_state = match (self.state, event) {
            (S::Idle, E::Submit) => S::InFlight,
            (S::InFlight, E::ResultRendered) => S::Rendered,
            (S::InFlight, E::ApplicationError) => S::Alerted,
            (S::InFlight, E::TransportFailed) => S::Alerted,
            (S::InFlight, E::MalformedResponse) => S::Faulted,
            _ => {
                warn!(
                    "Invalid submission transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::fsm(format!(
                    "Invalid transition from {:?} with event {:?}",
                    self.state, event
                )));
            }
        };

        debug!(
            "Submission state: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Rendered | SubmissionState::Alerted | SubmissionState::Faulted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(SubmissionEvent::ResultRendered, SubmissionState::Rendered)]
    #[case(SubmissionEvent::ApplicationError, SubmissionState::Alerted)]
    #[case(SubmissionEvent::TransportFailed, SubmissionState::Alerted)]
    #[case(SubmissionEvent::MalformedResponse, SubmissionState::Faulted)]
    fn test_in_flight_resolves_to_terminal(
        #[case] event: SubmissionEvent,
        #[case] expected: SubmissionState,
    ) {
        let mut fsm = SubmissionStateMachine::new();
        fsm.transition(SubmissionEvent::Submit).unwrap();
        assert_eq!(fsm.current_state(), SubmissionState::InFlight);
        assert!(!fsm.is_terminal());

        fsm.transition(event).unwrap();
        assert_eq!(fsm.current_state(), expected);
        assert!(fsm.is_terminal());
    }

    #[test]
    fn test_cannot_resolve_before_submit() {
        let mut fsm = SubmissionStateMachine::new();
        let err = fsm.transition(SubmissionEvent::ResultRendered).unwrap_err();

        assert!(err.to_string().contains("Invalid transition"));
        assert_eq!(fsm.current_state(), SubmissionState::Idle);
    }

    #[test]
    fn test_terminal_state_rejects_resubmit() {
        let mut fsm = SubmissionStateMachine::new();
        fsm.transition(SubmissionEvent::Submit).unwrap();
        fsm.transition(SubmissionEvent::TransportFailed).unwrap();

        assert!(fsm.transition(SubmissionEvent::Submit).is_err());
        assert_eq!(fsm.current_state(), SubmissionState::Alerted);
    }
}
