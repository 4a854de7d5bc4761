//! Background execution of a single [`Invocation`].
//!
//! A [`Worker`] launches its child on a dedicated OS thread with standard output and
//! standard error merged into one pipe, optionally feeds it a line on standard input,
//! and relays every output line through a channel as soon as it is read. The
//! consumer holds a [`Run`], which yields the events in the order they were produced
//! and always ends with exactly one [`Event::Finished`].

use std::fmt::{Display, Formatter};
use std::io::{BufRead, BufReader, ErrorKind, PipeReader, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::invocation::{Invocation, Secret};

/// Completion code reported when the child could not be started or its output
/// could not be read.
pub const LAUNCH_FAILURE_CODE: i32 = -1;
/// Completion code reported when a run was cancelled.
pub const CANCELLED_CODE: i32 = -2;
/// Completion code reported when a run exceeded its timeout.
pub const TIMED_OUT_CODE: i32 = -3;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);
const PROCESS_DIAGNOSTIC_PREFIX: &str = "Error";
const BUILD_DIAGNOSTIC_PREFIX: &str = "Build error";

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The child exited on its own. On Unix a child killed by a signal is reported
    /// with the shell convention `128 + signal`.
    Exited(i32),
    /// The child could not be started.
    LaunchFailed,
    /// Reading the child's output failed part way through.
    StreamFailed,
    Cancelled,
    TimedOut,
}

impl Completion {
    pub fn code(&self) -> i32 {
        match self {
            Completion::Exited(code) => *code,
            Completion::LaunchFailed | Completion::StreamFailed => LAUNCH_FAILURE_CODE,
            Completion::Cancelled => CANCELLED_CODE,
            Completion::TimedOut => TIMED_OUT_CODE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Exited(0))
    }
}

impl Display for Completion {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Exited(code) => write!(formatter, "exited with code {code}"),
            Completion::LaunchFailed => formatter.write_str("failed to launch"),
            Completion::StreamFailed => formatter.write_str("failed while reading output"),
            Completion::Cancelled => formatter.write_str("cancelled"),
            Completion::TimedOut => formatter.write_str("timed out"),
        }
    }
}

/// Something a run reports back to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The child was created. Never sent when the launch fails.
    Started { pid: u32 },
    /// One line of the child's merged output, terminator included.
    Line(String),
    /// A message produced by the worker itself rather than by the child.
    Diagnostic(String),
    /// Always the last event of a run.
    Finished(Completion),
}

impl Display for Event {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Started { pid } => write!(formatter, "started (pid {pid})"),
            Event::Line(_) => formatter.write_str("output line"),
            Event::Diagnostic(_) => formatter.write_str("diagnostic"),
            Event::Finished(completion) => write!(formatter, "finished ({completion})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Cancelled,
    TimedOut,
}

#[derive(Debug, Default)]
struct StopState {
    reason: Mutex<Option<StopReason>>,
    /// Set once a stop killed a child that was still running.
    interrupted: AtomicBool,
    child: Mutex<Option<Child>>,
}

/// Handle used to stop a run from any thread.
///
/// Stopping kills the child. The run then finishes with [`Completion::Cancelled`]
/// (or [`Completion::TimedOut`] when its watchdog fired). A child that had already
/// exited on its own keeps its exit status.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<StopState>,
}

impl CancelToken {
    pub fn cancel(&self) {
        self.stop(StopReason::Cancelled);
    }

    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    fn stop(&self, reason: StopReason) {
        {
            let mut current = lock(&self.state.reason);
            if current.is_some() {
                return;
            }
            *current = Some(reason);
        }
        debug!("Stopping run: {reason:?}");
        self.interrupt();
    }

    fn reason(&self) -> Option<StopReason> {
        *lock(&self.state.reason)
    }

    fn interrupt(&self) {
        if self.kill_child() {
            self.state.interrupted.store(true, Ordering::SeqCst);
        }
    }

    fn was_interrupted(&self) -> bool {
        self.state.interrupted.load(Ordering::SeqCst)
    }

    /// Kills the child if it is still running and reports whether it was.
    fn kill_child(&self) -> bool {
        let mut child = lock(&self.state.child);
        let Some(child) = child.as_mut() else {
            return false;
        };

        // The status is kept by `Child`, so the later reap still sees it.
        if let Ok(Some(status)) = child.try_wait() {
            debug!("Child {} already exited with {status}", child.id());
            return false;
        }

        match child.kill() {
            Ok(()) => true,
            // InvalidInput means the child already exited.
            Err(e) if e.kind() == ErrorKind::InvalidInput => false,
            Err(e) => {
                warn!("Failed to kill child {}: {e}", child.id());
                false
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Single-use executor for one [`Invocation`].
#[derive(Debug)]
pub struct Worker {
    invocation: Invocation,
    diagnostic_prefix: &'static str,
}

impl Worker {
    pub fn new(invocation: Invocation) -> Self {
        Self {
            invocation,
            diagnostic_prefix: PROCESS_DIAGNOSTIC_PREFIX,
        }
    }

    /// A worker running a fixed build command in `working_directory`, with no input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuildCommand`] if `command` has no program.
    pub fn build(
        command: &[String],
        working_directory: &Path,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let (program, arguments) = command.split_first().ok_or(Error::EmptyBuildCommand)?;

        let invocation = Invocation::new(program)
            .args(arguments.iter().cloned())
            .current_dir(working_directory)
            .timeout(timeout);

        Ok(Self {
            invocation,
            diagnostic_prefix: BUILD_DIAGNOSTIC_PREFIX,
        })
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Starts the worker thread and returns the handle its events arrive on.
    pub fn spawn(self) -> Run {
        let (sender, receiver) = mpsc::channel();
        let token = CancelToken::default();

        let thread_token = token.clone();
        let thread_sender = sender.clone();
        let spawned = thread::Builder::new()
            .name("encryd-worker".to_string())
            .spawn(move || execute(self, &thread_sender, &thread_token));

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Could not start worker thread: {e}");
                emit(&sender, Event::Diagnostic(format!("Error: {e}\n")));
                emit(&sender, Event::Finished(Completion::LaunchFailed));
                None
            }
        };

        Run {
            events: receiver,
            token,
            handle,
            finished: false,
        }
    }
}

/// Runs `invocation` on a background thread.
pub fn spawn(invocation: Invocation) -> Run {
    Worker::new(invocation).spawn()
}

/// The consumer side of a running [`Worker`].
///
/// Iterating blocks until the next event arrives and ends after
/// [`Event::Finished`].
#[derive(Debug)]
pub struct Run {
    events: Receiver<Event>,
    token: CancelToken,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl Run {
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the next event if one is ready, without blocking.
    pub fn try_next(&mut self) -> Option<Event> {
        if self.finished {
            return None;
        }

        match self.events.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.worker_vanished()),
        }
    }

    /// Discards the remaining output and returns the completion.
    pub fn wait(self) -> Completion {
        self.last()
            .and_then(|event| match event {
                Event::Finished(completion) => Some(completion),
                _ => None,
            })
            .unwrap_or(Completion::StreamFailed)
    }

    fn observe(&mut self, event: Event) -> Event {
        if matches!(event, Event::Finished(_)) {
            self.finished = true;
            if let Some(handle) = self.handle.take() {
                // The worker sends `Finished` as its last action.
                let _ = handle.join();
            }
        }
        event
    }

    fn worker_vanished(&mut self) -> Event {
        warn!("Worker stopped without reporting completion");
        self.finished = true;
        Event::Finished(Completion::StreamFailed)
    }
}

impl Iterator for Run {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.events.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(_) => Some(self.worker_vanished()),
        }
    }
}

fn emit(sender: &Sender<Event>, event: Event) {
    // A dropped receiver only means nobody is listening; the child is still reaped.
    let _ = sender.send(event);
}

fn execute(worker: Worker, sender: &Sender<Event>, token: &CancelToken) {
    let Worker {
        invocation,
        diagnostic_prefix,
    } = worker;

    info!("Launching `{invocation}`");

    let (reader, stdin) = match launch(&invocation, token) {
        Ok(launched) => launched,
        Err(e) => {
            warn!("Failed to launch `{}`: {e}", invocation.program.display());
            emit(sender, Event::Diagnostic(format!("{diagnostic_prefix}: {e}\n")));
            emit(sender, Event::Finished(Completion::LaunchFailed));
            return;
        }
    };

    if let Some(pid) = lock(&token.state.child).as_ref().map(Child::id) {
        debug!("Spawned `{}` with pid {pid}", invocation.program.display());
        emit(sender, Event::Started { pid });
    }

    // Dropping the sender disconnects the watchdog once the run is over.
    let _watchdog = invocation.timeout.map(|timeout| start_watchdog(timeout, token));

    if let (Some(stdin), Some(line)) = (stdin, invocation.stdin_line.as_ref()) {
        write_stdin_line(stdin, line);
    }

    let streamed = stream_lines(reader, sender, token);

    let status = match wait_for_exit(token) {
        Ok(status) => status,
        Err(e) => {
            warn!("Failed to wait for `{}`: {e}", invocation.program.display());
            emit(sender, Event::Diagnostic(format!("{diagnostic_prefix}: {e}\n")));
            emit(sender, Event::Finished(Completion::StreamFailed));
            return;
        }
    };

    let completion = conclude(streamed, exit_code(status), token, diagnostic_prefix, sender);

    info!("`{}` {completion}", invocation.program.display());
    emit(sender, Event::Finished(completion));
}

/// Decides how a reaped run ended.
///
/// A stop only counts when it killed a running child. A failed stream is reported
/// with one diagnostic line.
fn conclude(
    streamed: std::io::Result<()>,
    code: i32,
    token: &CancelToken,
    diagnostic_prefix: &str,
    sender: &Sender<Event>,
) -> Completion {
    let interrupted = token.was_interrupted();

    match (token.reason(), streamed) {
        (Some(StopReason::Cancelled), _) if interrupted => Completion::Cancelled,
        (Some(StopReason::TimedOut), _) if interrupted => Completion::TimedOut,
        (_, Err(e)) => {
            emit(sender, Event::Diagnostic(format!("{diagnostic_prefix}: {e}\n")));
            Completion::StreamFailed
        }
        (_, Ok(())) => Completion::Exited(code),
    }
}

/// Spawns the child with both output streams writing into one pipe.
///
/// The child is parked in the token's state so that it can be killed from other
/// threads while this one is blocked on reading.
fn launch(
    invocation: &Invocation,
    token: &CancelToken,
) -> std::io::Result<(PipeReader, Option<ChildStdin>)> {
    let (reader, writer) = std::io::pipe()?;
    let error_writer = writer.try_clone()?;

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.arguments)
        .stdout(writer)
        .stderr(error_writer);

    if invocation.stdin_line.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }

    if let Some(working_directory) = &invocation.working_directory {
        command.current_dir(working_directory);
    }

    let mut child = command.spawn()?;
    // Close our copies of the write ends, otherwise reading never sees EOF.
    drop(command);

    let stdin = child.stdin.take();
    *lock(&token.state.child) = Some(child);

    // A stop requested before the child existed could not kill it.
    if token.is_cancelled() {
        token.interrupt();
    }

    Ok((reader, stdin))
}

fn write_stdin_line(mut stdin: ChildStdin, line: &Secret) {
    let written = stdin
        .write_all(line.expose().as_bytes())
        .and_then(|()| stdin.write_all(b"\n"))
        .and_then(|()| stdin.flush());

    if let Err(e) = written {
        warn!("Could not write to the child's standard input: {e}");
    }
    // `stdin` is dropped here, closing the child's input.
}

fn stream_lines<R: Read + Send + 'static>(
    reader: R,
    sender: &Sender<Event>,
    token: &CancelToken,
) -> std::io::Result<()> {
    let lines = match start_reader(reader) {
        Ok(lines) => lines,
        Err(e) => {
            token.kill_child();
            return Err(e);
        }
    };

    loop {
        match lines.recv_timeout(CANCEL_POLL_INTERVAL) {
            Ok(Ok(line)) => emit(sender, Event::Line(line)),
            Ok(Err(e)) => {
                token.kill_child();
                return Err(e);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        if token.is_cancelled() {
            // Lines a child wrote before exiting on its own are still delivered.
            while let Ok(Ok(line)) = lines.try_recv() {
                emit(sender, Event::Line(line));
            }
            return Ok(());
        }
    }
}

/// Reads the merged output on its own thread, so a stop request is noticed even
/// while nothing arrives. A grandchild that inherited the pipe keeps only this
/// thread alive after the child is killed.
fn start_reader<R: Read + Send + 'static>(
    reader: R,
) -> std::io::Result<Receiver<std::io::Result<String>>> {
    let (sender, receiver) = mpsc::channel();

    thread::Builder::new()
        .name("encryd-reader".to_string())
        .spawn(move || {
            let mut reader = BufReader::new(reader);
            let mut buffer = Vec::new();

            loop {
                buffer.clear();
                let result = match reader.read_until(b'\n', &mut buffer) {
                    Ok(0) => return,
                    Ok(_) => Ok(String::from_utf8_lossy(&buffer).into_owned()),
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => Err(e),
                };

                let failed = result.is_err();
                if sender.send(result).is_err() || failed {
                    return;
                }
            }
        })?;

    Ok(receiver)
}

fn wait_for_exit(token: &CancelToken) -> std::io::Result<ExitStatus> {
    loop {
        {
            let mut child = lock(&token.state.child);
            let Some(child) = child.as_mut() else {
                return Err(std::io::Error::other("child process handle missing"));
            };
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

fn start_watchdog(timeout: Duration, token: &CancelToken) -> Sender<()> {
    let (done, finished) = mpsc::channel::<()>();
    let token = token.clone();

    let spawned = thread::Builder::new()
        .name("encryd-watchdog".to_string())
        .spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(timeout) {
                warn!("Run exceeded its timeout of {timeout:?}");
                token.stop(StopReason::TimedOut);
            }
        });

    if let Err(e) = spawned {
        warn!("Could not start timeout watchdog: {e}");
    }

    done
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    // Neither an exit code nor a signal; still a failure.
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_codes() {
        assert_eq!(Completion::Exited(0).code(), 0);
        assert_eq!(Completion::Exited(3).code(), 3);
        assert_eq!(Completion::LaunchFailed.code(), LAUNCH_FAILURE_CODE);
        assert_eq!(Completion::StreamFailed.code(), LAUNCH_FAILURE_CODE);
        assert_eq!(Completion::Cancelled.code(), CANCELLED_CODE);
        assert_eq!(Completion::TimedOut.code(), TIMED_OUT_CODE);
    }

    #[test]
    fn test_only_exit_zero_is_success() {
        assert!(Completion::Exited(0).is_success());
        assert!(!Completion::Exited(1).is_success());
        assert!(!Completion::Exited(-1).is_success());
        assert!(!Completion::LaunchFailed.is_success());
        assert!(!Completion::Cancelled.is_success());
        assert!(!Completion::TimedOut.is_success());
    }

    #[test]
    fn test_sentinels_are_distinct() {
        let codes = [LAUNCH_FAILURE_CODE, CANCELLED_CODE, TIMED_OUT_CODE];
        assert!(codes.iter().all(|code| *code < 0));
        assert_ne!(LAUNCH_FAILURE_CODE, CANCELLED_CODE);
        assert_ne!(CANCELLED_CODE, TIMED_OUT_CODE);
    }

    #[test]
    fn test_build_worker_rejects_empty_command() {
        let result = Worker::build(&[], Path::new("/tmp"), None);
        assert!(matches!(result, Err(Error::EmptyBuildCommand)));
    }

    #[test]
    fn test_build_worker_invocation() {
        let command = vec!["make".to_string(), "all".to_string()];
        let worker = Worker::build(&command, Path::new("/opt/encryd"), None).unwrap();
        let invocation = worker.invocation();

        assert_eq!(invocation.program, Path::new("make"));
        assert_eq!(invocation.arguments, vec!["all"]);
        assert_eq!(
            invocation.working_directory.as_deref(),
            Some(Path::new("/opt/encryd"))
        );
        assert!(invocation.stdin_line.is_none());
    }

    #[test]
    fn test_launch_failure_reports_diagnostic_and_sentinel() {
        let run = spawn(Invocation::new("/this/path/does/not/exist/encryptor"));
        let events: Vec<Event> = run.collect();

        assert_eq!(events.len(), 2);
        match &events[0] {
            Event::Diagnostic(message) => assert!(message.starts_with("Error: ")),
            other => panic!("Expected a diagnostic, got {other:?}"),
        }
        assert_eq!(events[1], Event::Finished(Completion::LaunchFailed));
    }

    #[test]
    fn test_build_launch_failure_uses_build_prefix() {
        let command = vec!["/this/path/does/not/exist/make".to_string()];
        let worker = Worker::build(&command, Path::new("."), None).unwrap();
        let events: Vec<Event> = worker.spawn().collect();

        match &events[0] {
            Event::Diagnostic(message) => assert!(message.starts_with("Build error: ")),
            other => panic!("Expected a diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn test_run_yields_nothing_after_finished() {
        let mut run = spawn(Invocation::new("/this/path/does/not/exist"));
        for event in run.by_ref() {
            if matches!(event, Event::Finished(_)) {
                break;
            }
        }
        assert!(run.is_finished());
        assert!(run.next().is_none());
        assert!(run.try_next().is_none());
    }

    /// Yields one line, then fails like a pipe that went away.
    struct BrokenAfterFirstLine {
        sent: bool,
    }

    impl Read for BrokenAfterFirstLine {
        fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
            if self.sent {
                return Err(std::io::Error::from(ErrorKind::BrokenPipe));
            }
            self.sent = true;
            let line = b"partial output\n";
            buffer[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    fn broken_reader() -> BrokenAfterFirstLine {
        BrokenAfterFirstLine { sent: false }
    }

    #[test]
    fn test_reader_relays_lines_then_the_error() {
        let lines = start_reader(broken_reader()).unwrap();

        assert_eq!(lines.recv().unwrap().unwrap(), "partial output\n");
        let error = lines.recv().unwrap().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BrokenPipe);
        assert!(lines.recv().is_err());
    }

    #[test]
    fn test_stream_failure_is_reported_once() {
        let (sender, receiver) = mpsc::channel();
        let token = CancelToken::default();

        let streamed = stream_lines(broken_reader(), &sender, &token);
        assert!(streamed.is_err());

        let completion = conclude(streamed, 0, &token, PROCESS_DIAGNOSTIC_PREFIX, &sender);
        drop(sender);
        let events: Vec<Event> = receiver.iter().collect();

        assert_eq!(completion, Completion::StreamFailed);
        assert_eq!(completion.code(), LAUNCH_FAILURE_CODE);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::Line("partial output\n".to_string()));
        match &events[1] {
            Event::Diagnostic(message) => {
                assert!(message.starts_with("Error: "));
                assert!(message.ends_with('\n'));
            }
            other => panic!("Expected a diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn test_build_stream_failure_uses_build_prefix() {
        let (sender, receiver) = mpsc::channel();
        let token = CancelToken::default();

        let streamed = stream_lines(broken_reader(), &sender, &token);
        let completion = conclude(streamed, 0, &token, BUILD_DIAGNOSTIC_PREFIX, &sender);
        drop(sender);

        assert_eq!(completion, Completion::StreamFailed);
        let diagnostics: Vec<String> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Diagnostic(message) => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].starts_with("Build error: "));
    }

    #[test]
    fn test_stop_without_running_child_keeps_exit_status() {
        let (sender, _receiver) = mpsc::channel();
        let token = CancelToken::default();
        token.cancel();

        assert!(!token.was_interrupted());
        let completion = conclude(Ok(()), 0, &token, PROCESS_DIAGNOSTIC_PREFIX, &sender);
        assert_eq!(completion, Completion::Exited(0));
    }

    #[test]
    fn test_stop_that_killed_the_child_wins() {
        let (sender, _receiver) = mpsc::channel();

        let token = CancelToken::default();
        token.cancel();
        token.state.interrupted.store(true, Ordering::SeqCst);
        let completion = conclude(Ok(()), 137, &token, PROCESS_DIAGNOSTIC_PREFIX, &sender);
        assert_eq!(completion, Completion::Cancelled);

        let token = CancelToken::default();
        token.stop(StopReason::TimedOut);
        token.state.interrupted.store(true, Ordering::SeqCst);
        let completion = conclude(Ok(()), 137, &token, PROCESS_DIAGNOSTIC_PREFIX, &sender);
        assert_eq!(completion, Completion::TimedOut);
    }

    #[test]
    fn test_cancel_token_is_idempotent() {
        let token = CancelToken::default();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.reason(), Some(StopReason::Cancelled));
    }
}
