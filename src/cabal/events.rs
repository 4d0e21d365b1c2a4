//! Events emitted by the facade for a host to observe.

use std::path::PathBuf;
use std::sync::mpsc;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A fire-and-forget user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Output stream of a child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Something the host may want to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A tool process was spawned.
    ProcessStarted {
        command: String,
        pid: u32,
        working_dir: PathBuf,
    },
    /// One line of process output.
    ProcessOutput {
        command: String,
        stream: Stream,
        line: String,
    },
    /// A process exited; `success` is `false` for non-zero exits and failed waits.
    ProcessFinished {
        command: String,
        success: bool,
        code: Option<i32>,
    },
    Notification(Notification),
}

/// Receives facade events. Implementations must not block for long.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::ProcessStarted {
                command,
                pid,
                working_dir,
            } => tracing::info!("started `{}` (pid {}) in {}", command, pid, working_dir.display()),
            Event::ProcessOutput {
                command,
                stream,
                line,
            } => tracing::debug!("[{} {:?}] {}", command, stream, line),
            Event::ProcessFinished {
                command,
                success,
                code,
            } => {
                if success {
                    tracing::info!("`{}` finished", command);
                } else {
                    tracing::warn!("`{}` failed with exit code {:?}", command, code);
                }
            }
            Event::Notification(Notification {
                title,
                message,
                severity,
            }) => match severity {
                Severity::Error => tracing::error!("{}: {}", title, message),
                Severity::Warning => tracing::warn!("{}: {}", title, message),
                Severity::Info => tracing::info!("{}: {}", title, message),
            },
        }
    }
}

/// Channel sink; events sent after the receiver is dropped are discarded.
impl EventSink for mpsc::Sender<Event> {
    fn emit(&self, event: Event) {
        let _ = self.send(event);
    }
}

impl EventSink for mpsc::SyncSender<Event> {
    fn emit(&self, event: Event) {
        let _ = self.send(event);
    }
}
