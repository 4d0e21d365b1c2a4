//! High-level cabal actions.

use super::error::CabalError;
use super::events::{Event, EventSink, Notification, TracingSink};
use super::packages::{PackageRecord, index_cache_path, parse_index, parse_installed};
use super::process::{CabalProcess, ProcessCommand, ProcessState};
use super::settings::CabalSettings;
use crate::project;
use parking_lot::Mutex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const ERROR_TITLE: &str = "Cabal error";

/// Facade over the `cabal` and `ghc-pkg` executables for one project.
///
/// Clones share the event sink and the lock serializing `update` and
/// `install`. `configure`, `build` and `clean` never take that lock.
#[derive(Clone)]
pub struct CabalInterface {
    project_root: PathBuf,
    settings: CabalSettings,
    sink: Arc<dyn EventSink>,
    lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for CabalInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CabalInterface")
            .field("project_root", &self.project_root)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CabalInterface {
    /// Events go to [`TracingSink`] until [`with_sink`](Self::with_sink) replaces it.
    pub fn new(project_root: impl Into<PathBuf>, settings: CabalSettings) -> Self {
        Self {
            project_root: project_root.into(),
            settings,
            sink: Arc::new(TracingSink),
            lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings(&self) -> &CabalSettings {
        &self.settings
    }

    fn notify(&self, message: impl Into<String>) {
        self.sink
            .emit(Event::Notification(Notification::error(ERROR_TITLE, message)));
    }

    /// The package description in the project root, notifying when there is none.
    pub fn find_cabal_file(&self) -> Option<PathBuf> {
        let found = project::find_cabal_file(&self.project_root);
        if found.is_none() {
            self.notify("Can't find cabal file.");
        }
        found
    }

    // =========================================================================
    // Package actions
    // =========================================================================

    /// `cabal configure` in the package directory.
    pub fn configure(&self, cabal_file: &Path) -> Result<CabalProcess, CabalError> {
        self.run_in_package(cabal_file, "configure")
    }

    /// `cabal build` in the package directory.
    pub fn build(&self, cabal_file: &Path) -> Result<CabalProcess, CabalError> {
        self.run_in_package(cabal_file, "build")
    }

    /// `cabal clean` in the package directory.
    pub fn clean(&self, cabal_file: &Path) -> Result<CabalProcess, CabalError> {
        self.run_in_package(cabal_file, "clean")
    }

    fn run_in_package(&self, cabal_file: &Path, subcommand: &str) -> Result<CabalProcess, CabalError> {
        let dir = match cabal_file.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => return Err(CabalError::NoParentDirectory(cabal_file.to_path_buf())),
        };
        ProcessCommand::new(&self.settings.cabal_path, dir)
            .arg(subcommand)
            .spawn(Arc::clone(&self.sink))
    }

    /// Whether `cabal -V` can be run to completion.
    pub fn check_version(&self) -> bool {
        let command = ProcessCommand::new(&self.settings.cabal_path, &self.project_root).arg("-V");
        match command.spawn(Arc::clone(&self.sink)).and_then(|mut p| p.wait()) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("cabal version check failed: {}", err);
                false
            }
        }
    }

    // =========================================================================
    // Package listings
    // =========================================================================

    /// Packages known to the local Hackage index, ordered by name.
    ///
    /// An unreadable index yields an empty list and one notification.
    pub fn packages_list(&self) -> Vec<PackageRecord> {
        let path = index_cache_path(&self.settings.cabal_data_path);
        let records = File::open(&path)
            .map_err(CabalError::from)
            .and_then(|file| parse_index(BufReader::new(file)));
        match records {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("cannot read package index {}: {}", path.display(), err);
                self.notify("Can't read cabal package list.");
                Vec::new()
            }
        }
    }

    /// Packages registered with the compiler, ordered by name.
    ///
    /// A failed `ghc-pkg` run yields an empty list and one notification.
    pub fn installed_packages_list(&self) -> Vec<PackageRecord> {
        let command = ProcessCommand::new(&self.settings.ghc_pkg_path, &self.project_root)
            .args(["--simple-output", "list"]);
        match command.output() {
            Ok(output) => parse_installed(&output),
            Err(err) => {
                tracing::warn!("cannot list installed packages: {}", err);
                self.notify("Can't read installed package list using ghc-pkg.");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Serialized background actions
    // =========================================================================

    /// `cabal update` on a background thread.
    pub fn update(&self) -> BackgroundTask {
        self.run_exclusive(vec!["update".to_string()])
    }

    /// `cabal install <package>` on a background thread.
    pub fn install(&self, package: &str) -> BackgroundTask {
        self.run_exclusive(vec!["install".to_string(), package.to_string()])
    }

    fn run_exclusive(&self, args: Vec<String>) -> BackgroundTask {
        let name = format!("cabal-{}", args.first().map(String::as_str).unwrap_or("task"));
        let this = self.clone();
        match thread::Builder::new().name(name).spawn(move || this.run_locked(args)) {
            Ok(handle) => BackgroundTask {
                inner: TaskInner::Running(handle),
            },
            Err(err) => {
                self.notify(format!("Can't start background task: {err}"));
                BackgroundTask {
                    inner: TaskInner::Done(ProcessState::Failed(err.to_string())),
                }
            }
        }
    }

    /// Spawn and fully wait while holding the lock.
    fn run_locked(&self, args: Vec<String>) -> ProcessState {
        let _guard = self.lock.lock();
        let command = ProcessCommand::new(&self.settings.cabal_path, &self.project_root).args(args);

        let mut process = match command.spawn(Arc::clone(&self.sink)) {
            Ok(process) => process,
            Err(err) => {
                self.notify(err.to_string());
                return ProcessState::Failed(err.to_string());
            }
        };
        if let Err(err) = process.wait() {
            self.notify(err.to_string());
        }
        process.state().clone()
    }
}

/// Handle to an `update` or `install` running on a worker thread.
#[derive(Debug)]
pub struct BackgroundTask {
    inner: TaskInner,
}

#[derive(Debug)]
enum TaskInner {
    Running(JoinHandle<ProcessState>),
    Done(ProcessState),
}

impl BackgroundTask {
    pub fn is_finished(&self) -> bool {
        match &self.inner {
            TaskInner::Running(handle) => handle.is_finished(),
            TaskInner::Done(_) => true,
        }
    }

    /// Block until the task ends and return the final process state.
    pub fn join(self) -> ProcessState {
        match self.inner {
            TaskInner::Running(handle) => handle
                .join()
                .unwrap_or_else(|_| ProcessState::Failed("background task panicked".to_string())),
            TaskInner::Done(state) => state,
        }
    }
}
