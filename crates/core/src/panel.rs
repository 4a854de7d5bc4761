//! A display panel owning one output buffer and at most one run in flight.
//!
//! The panel is the consumer side of a worker: it is driven from a single thread
//! (the interface's), pulls events off the run, appends them to its buffer and
//! tracks the [`RunState`]. A second `start` while a run is still streaming is
//! rejected instead of racing the first run for the buffer.

use log::warn;

use crate::error::{Error, Result};
use crate::invocation::Invocation;
use crate::operations::Operation;
use crate::state::RunState;
use crate::worker::{Completion, Event, Run, Worker};

#[derive(Debug)]
pub struct Panel {
    operation: Operation,
    output: Vec<String>,
    state: RunState,
    run: Option<Run>,
    completion: Option<Completion>,
}

impl Panel {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            output: Vec::new(),
            state: RunState::Idle,
            run: None,
            completion: None,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Completion of the most recent run, once it has finished.
    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    /// Everything shown in the panel so far, in arrival order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Appends a local message, such as a validation failure, without running anything.
    pub fn note(&mut self, message: impl Into<String>) {
        self.push_terminated(message.into());
    }

    /// Starts a process worker for `invocation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PanelBusy`] while a previous run has not finished.
    pub fn start(&mut self, invocation: Invocation) -> Result<()> {
        self.start_worker(Worker::new(invocation))
    }

    /// Starts `worker`, clearing the previous output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PanelBusy`] while a previous run has not finished.
    pub fn start_worker(&mut self, worker: Worker) -> Result<()> {
        if self.is_busy() {
            return Err(Error::PanelBusy(self.operation.title().to_string()));
        }

        self.state.launch()?;
        self.output.clear();
        self.completion = None;
        self.run = Some(worker.spawn());
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(run) = &self.run {
            run.cancel();
        }
    }

    /// Blocks for the next event of the current run and applies it.
    ///
    /// Returns `None` when there is no run or it has already finished.
    pub fn next_event(&mut self) -> Option<Event> {
        let event = self.run.as_mut()?.next()?;
        Some(self.apply(event))
    }

    /// Applies every event that is ready, without blocking.
    pub fn poll(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        while let Some(event) = self.run.as_mut().and_then(Run::try_next) {
            events.push(self.apply(event));
        }

        events
    }

    /// Drives the current run to the end and returns its completion.
    pub fn wait(&mut self) -> Option<Completion> {
        while self.next_event().is_some() {}
        self.completion
    }

    fn apply(&mut self, event: Event) -> Event {
        if let Err(e) = self.state.apply(&event) {
            warn!("{} panel: {e}", self.operation);
        }

        match &event {
            Event::Started { .. } => {}
            Event::Line(line) | Event::Diagnostic(line) => self.output.push(line.clone()),
            Event::Finished(completion) => {
                self.completion = Some(*completion);
                self.push_terminated(self.operation.status_line(completion));
                self.run = None;
            }
        }

        event
    }

    fn push_terminated(&mut self, mut message: String) {
        if !message.ends_with('\n') {
            message.push('\n');
        }
        self.output.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_idle() {
        let panel = Panel::new(Operation::Encrypt);
        assert_eq!(panel.state(), RunState::Idle);
        assert!(!panel.is_busy());
        assert!(panel.output().is_empty());
        assert!(panel.completion().is_none());
    }

    #[test]
    fn test_note_appends_terminated_line() {
        let mut panel = Panel::new(Operation::Decrypt);
        panel.note("Please provide all fields.");
        assert_eq!(panel.output(), ["Please provide all fields.\n"]);
        assert_eq!(panel.state(), RunState::Idle);
    }

    #[test]
    fn test_idle_panel_has_no_events() {
        let mut panel = Panel::new(Operation::Build);
        assert!(panel.next_event().is_none());
        assert!(panel.poll().is_empty());
        assert!(panel.wait().is_none());
    }

    #[test]
    fn test_launch_failure_is_reported_in_output() {
        let mut panel = Panel::new(Operation::Encrypt);
        panel
            .start(Invocation::new("/this/path/does/not/exist/encryptor").stdin_line("pw"))
            .unwrap();

        let completion = panel.wait();
        assert_eq!(completion, Some(Completion::LaunchFailed));
        assert_eq!(panel.state(), RunState::LaunchFailed);
        assert_eq!(panel.output().len(), 2);
        assert!(panel.output()[0].starts_with("Error: "));
        assert_eq!(panel.output()[1], "[Failed. Exit code: -1]\n");
    }

    #[test]
    fn test_finished_panel_can_start_again() {
        let mut panel = Panel::new(Operation::Decrypt);
        panel
            .start(Invocation::new("/this/path/does/not/exist"))
            .unwrap();
        panel.wait();

        panel
            .start(Invocation::new("/this/path/does/not/exist/either"))
            .unwrap();
        assert!(panel.output().is_empty());
        panel.wait();
        assert_eq!(panel.state(), RunState::LaunchFailed);
    }
}
