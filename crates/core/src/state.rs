//! Lifecycle of one run, as seen by whoever consumes its events.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::worker::{Completion, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No invocation in progress.
    #[default]
    Idle,
    /// Invocation requested, child creation attempted.
    Launching,
    /// Child running, output lines arriving.
    Streaming,
    Succeeded,
    Failed(i32),
    LaunchFailed,
    Cancelled,
    TimedOut,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Succeeded
                | RunState::Failed(_)
                | RunState::LaunchFailed
                | RunState::Cancelled
                | RunState::TimedOut
        )
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, RunState::Launching | RunState::Streaming)
    }

    /// Moves from `Idle` (or a finished run) to `Launching`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] while a run is in flight.
    pub fn launch(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(Error::InvalidTransition {
                from: *self,
                event: "launch".to_string(),
            });
        }
        *self = RunState::Launching;
        Ok(())
    }

    /// Advances the state with the next event of the current run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] for events that cannot follow the
    /// current state, such as any event after a terminal state.
    pub fn apply(&mut self, event: &Event) -> Result<()> {
        let next = match (*self, event) {
            (RunState::Launching, Event::Started { .. }) => RunState::Streaming,
            (RunState::Launching | RunState::Streaming, Event::Line(_) | Event::Diagnostic(_)) => {
                *self
            }
            (RunState::Launching | RunState::Streaming, Event::Finished(completion)) => {
                RunState::from(*completion)
            }
            (from, event) => {
                return Err(Error::InvalidTransition {
                    from,
                    event: event.to_string(),
                })
            }
        };

        *self = next;
        Ok(())
    }
}

impl From<Completion> for RunState {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Exited(0) => RunState::Succeeded,
            Completion::Exited(code) => RunState::Failed(code),
            Completion::LaunchFailed | Completion::StreamFailed => RunState::LaunchFailed,
            Completion::Cancelled => RunState::Cancelled,
            Completion::TimedOut => RunState::TimedOut,
        }
    }
}

impl Display for RunState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => formatter.write_str("idle"),
            RunState::Launching => formatter.write_str("launching"),
            RunState::Streaming => formatter.write_str("streaming"),
            RunState::Succeeded => formatter.write_str("completed (success)"),
            RunState::Failed(code) => write!(formatter, "completed (failure, code {code})"),
            RunState::LaunchFailed => formatter.write_str("launch failed"),
            RunState::Cancelled => formatter.write_str("cancelled"),
            RunState::TimedOut => formatter.write_str("timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launched() -> RunState {
        let mut state = RunState::default();
        state.launch().unwrap();
        state
    }

    #[test]
    fn test_successful_lifecycle() {
        let mut state = launched();
        assert_eq!(state, RunState::Launching);

        state.apply(&Event::Started { pid: 42 }).unwrap();
        assert_eq!(state, RunState::Streaming);

        state.apply(&Event::Line("line1\n".to_string())).unwrap();
        assert_eq!(state, RunState::Streaming);

        state.apply(&Event::Finished(Completion::Exited(0))).unwrap();
        assert_eq!(state, RunState::Succeeded);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_non_zero_exit_is_failure() {
        let mut state = launched();
        state.apply(&Event::Started { pid: 1 }).unwrap();
        state.apply(&Event::Finished(Completion::Exited(3))).unwrap();
        assert_eq!(state, RunState::Failed(3));
    }

    #[test]
    fn test_launch_failure_skips_streaming() {
        let mut state = launched();
        state
            .apply(&Event::Diagnostic("Error: not found\n".to_string()))
            .unwrap();
        state
            .apply(&Event::Finished(Completion::LaunchFailed))
            .unwrap();
        assert_eq!(state, RunState::LaunchFailed);
    }

    #[test]
    fn test_no_streaming_after_terminal_state() {
        let mut state = launched();
        state.apply(&Event::Finished(Completion::Exited(0))).unwrap();

        let result = state.apply(&Event::Line("late\n".to_string()));
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));

        let result = state.apply(&Event::Started { pid: 7 });
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));

        let result = state.apply(&Event::Finished(Completion::Exited(0)));
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_events_require_a_launch() {
        let mut state = RunState::Idle;
        let result = state.apply(&Event::Started { pid: 1 });
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_cannot_launch_while_busy() {
        let mut state = launched();
        assert!(state.launch().is_err());

        state.apply(&Event::Started { pid: 1 }).unwrap();
        assert!(state.launch().is_err());

        state.apply(&Event::Finished(Completion::Cancelled)).unwrap();
        assert_eq!(state, RunState::Cancelled);
        assert!(state.launch().is_ok());
    }

    #[test]
    fn test_completion_mapping() {
        assert_eq!(RunState::from(Completion::StreamFailed), RunState::LaunchFailed);
        assert_eq!(RunState::from(Completion::TimedOut), RunState::TimedOut);
        assert_eq!(RunState::from(Completion::Exited(-1)), RunState::Failed(-1));
    }
}
