//! Facade over the cabal package manager.
//!
//! Every action spawns the configured executable and reports through an
//! [`EventSink`]: process starts, output lines, exits and user-facing
//! notifications. Failures that the host should show the user are sent as
//! [`Notification`]s and the action returns an empty or `false` result instead
//! of an error.
//!
//! `update` and `install` run on worker threads and are serialized by one
//! lock shared between clones of a [`CabalInterface`]. Other actions run
//! concurrently with them.

mod error;
mod events;
mod interface;
mod packages;
mod process;
mod settings;

pub use error::CabalError;
pub use events::{Event, EventSink, Notification, Severity, Stream, TracingSink};
pub use interface::{BackgroundTask, CabalInterface};
pub use packages::{PackageRecord, index_cache_path, parse_index, parse_installed};
pub use process::{CabalProcess, ProcessCommand, ProcessState};
pub use settings::{CABAL_DATA_PATH_ENV, CABAL_PATH_ENV, CabalSettings, GHC_PKG_PATH_ENV};

#[cfg(test)]
mod tests;
