//! External process handles.

use super::error::CabalError;
use super::events::{Event, EventSink, Stream};
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Lifecycle of one external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessState {
    NotStarted,
    Running,
    /// Ran to completion. The exit status may still be non-zero.
    Succeeded(ExitStatus),
    /// Spawning or waiting failed.
    Failed(String),
}

impl ProcessState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// Whether the process exited with status zero.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(status) if status.success())
    }
}

/// A program invocation: executable, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    program: PathBuf,
    args: Vec<OsString>,
    working_dir: PathBuf,
}

impl ProcessCommand {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Command line for logs and events.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.working_dir);
        command
    }

    /// Spawn with piped output and announce it to `sink`.
    ///
    /// Output lines are forwarded to `sink` from background threads as soon as
    /// they are written, so the child never blocks on a full pipe.
    ///
    /// # Errors
    ///
    /// Returns [`CabalError::Spawn`] if the executable cannot be started.
    pub fn spawn(&self, sink: Arc<dyn EventSink>) -> Result<CabalProcess, CabalError> {
        let command = self.display();
        tracing::debug!("spawning `{}` in {}", command, self.working_dir.display());

        let mut child = self
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CabalError::Spawn {
                command: command.clone(),
                source,
            })?;

        sink.emit(Event::ProcessStarted {
            command: command.clone(),
            pid: child.id(),
            working_dir: self.working_dir.clone(),
        });

        let mut forwarders = Vec::with_capacity(2);
        if let Some(pipe) = child.stdout.take() {
            forwarders.extend(spawn_forwarder(pipe, Stream::Stdout, &command, &sink));
        }
        if let Some(pipe) = child.stderr.take() {
            forwarders.extend(spawn_forwarder(pipe, Stream::Stderr, &command, &sink));
        }

        Ok(CabalProcess {
            command,
            child,
            forwarders,
            state: ProcessState::Running,
            sink,
        })
    }

    /// Run to completion and capture stdout.
    ///
    /// Stderr is forwarded to the log. The exit status is logged, not checked.
    pub fn output(&self) -> Result<String, CabalError> {
        let command = self.display();
        let output = self
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CabalError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            tracing::warn!(
                "`{}` exited with {}: {}",
                command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A running (or finished) external process.
///
/// Its output is forwarded to the event sink while it runs. The exit event is
/// sent once the output has been drained.
pub struct CabalProcess {
    command: String,
    child: Child,
    forwarders: Vec<JoinHandle<()>>,
    state: ProcessState,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for CabalProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CabalProcess")
            .field("command", &self.command)
            .field("pid", &self.child.id())
            .field("state", &self.state)
            .finish()
    }
}

impl CabalProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Poll for exit without blocking.
    ///
    /// Once the child has exited this waits for the rest of its output.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>, CabalError> {
        if let ProcessState::Succeeded(status) = self.state {
            return Ok(Some(status));
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                self.finish(status);
                Ok(Some(status))
            }
            Ok(None) => Ok(None),
            Err(source) => Err(self.fail(source)),
        }
    }

    /// Wait for exit and for all output to reach the event sink.
    ///
    /// # Errors
    ///
    /// Returns [`CabalError::Wait`] if the process cannot be waited on.
    pub fn wait(&mut self) -> Result<ExitStatus, CabalError> {
        if let ProcessState::Succeeded(status) = self.state {
            return Ok(status);
        }
        match self.child.wait() {
            Ok(status) => {
                self.finish(status);
                Ok(status)
            }
            Err(source) => Err(self.fail(source)),
        }
    }

    fn join_forwarders(&mut self) {
        for handle in self.forwarders.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("output forwarder of `{}` panicked", self.command);
            }
        }
    }

    fn finish(&mut self, status: ExitStatus) {
        self.join_forwarders();
        tracing::debug!("`{}` exited with {}", self.command, status);
        self.state = ProcessState::Succeeded(status);
        self.sink.emit(Event::ProcessFinished {
            command: self.command.clone(),
            success: status.success(),
            code: status.code(),
        });
    }

    fn fail(&mut self, source: std::io::Error) -> CabalError {
        self.join_forwarders();
        tracing::warn!("waiting for `{}` failed: {}", self.command, source);
        self.state = ProcessState::Failed(source.to_string());
        self.sink.emit(Event::ProcessFinished {
            command: self.command.clone(),
            success: false,
            code: None,
        });
        CabalError::Wait {
            command: self.command.clone(),
            source,
        }
    }
}

fn spawn_forwarder<R: Read + Send + 'static>(
    pipe: R,
    stream: Stream,
    command: &str,
    sink: &Arc<dyn EventSink>,
) -> Option<JoinHandle<()>> {
    let sink = Arc::clone(sink);
    let owned = command.to_string();
    let name = match stream {
        Stream::Stdout => "cabal-stdout",
        Stream::Stderr => "cabal-stderr",
    };
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || forward_lines(pipe, stream, &owned, sink.as_ref()))
        .map_err(|err| tracing::warn!("cannot forward {:?} of `{}`: {}", stream, command, err))
        .ok()
}

fn forward_lines<R: Read>(pipe: R, stream: Stream, command: &str, sink: &dyn EventSink) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => sink.emit(Event::ProcessOutput {
                command: command.to_string(),
                stream,
                line: String::from_utf8_lossy(&buf).trim_end_matches(['\r', '\n']).to_string(),
            }),
            Err(err) => {
                tracing::warn!("reading {:?} of `{}` failed: {}", stream, command, err);
                break;
            }
        }
    }
}
