//! The fallback cascade: per file, try the external preview tool, then the
//! built-in window, then the OS default application.

mod report;
mod system;


pub use report::{BatchReport, Outcome, Strategy};
pub use system::SystemBackend;

use std::ffi::OsStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::PreviewError;
use crate::path::{normalize, PreviewRequest, ResolvedPath};
use crate::process::{await_startup, CommandLine, ProcessHandle};
use crate::tool::ToolInstallation;
use crate::window::Dismissal;

/// Host operations the cascade drives. [`SystemBackend`] talks to the real
/// OS; tests script each stage.
pub trait Backend {
    /// Find the preview tool.
    fn locate_tool(&self) -> Option<ToolInstallation>;
    /// Whether a process with this executable base name is alive.
    fn is_running(&self, process_name: &str) -> bool;
    /// Start a detached process.
    fn spawn(&self, command: &CommandLine) -> Result<ProcessHandle, PreviewError>;
    /// Block the calling thread.
    fn sleep(&self, duration: Duration);
    /// Show the built-in window and wait for it to be dismissed.
    fn show_window(&self, path: &ResolvedPath, fullscreen: bool) -> Result<Dismissal, PreviewError>;
    /// Open with the OS default application.
    fn open_default(&self, path: &ResolvedPath) -> Result<(), PreviewError>;
}

/// State shared by the files of one batch: the tool is located at most once,
/// and only once some file has passed normalisation.
#[derive(Debug, Default)]
pub struct BatchContext {
    tool: Option<Option<ToolInstallation>>,
}

impl BatchContext {
    fn tool<B: Backend>(&mut self, backend: &B) -> Option<&ToolInstallation> {
        self.tool.get_or_insert_with(|| backend.locate_tool()).as_ref()
    }
}

/// Runs the fallback cascade over a batch of files.
pub struct Cascade<'a, B> {
    backend: &'a B,
    config: &'a Config,
}

impl<'a, B: Backend> Cascade<'a, B> {
    /// A cascade driving `backend` under `config`.
    pub const fn new(backend: &'a B, config: &'a Config) -> Self {
        Self { backend, config }
    }

    /// Preview every request in order. One file's failure never stops the
    /// others; the report holds exactly one outcome per request.
    pub fn run(&self, requests: &[PreviewRequest]) -> BatchReport {
        let mut ctx = BatchContext::default();
        let entries = requests
            .iter()
            .map(|request| (request.clone(), self.preview_one(&mut ctx, request)))
            .collect();
        BatchReport::new(entries, self.config.batch.exit_policy)
    }

    /// Take one file through the cascade.
    pub fn preview_one(&self, ctx: &mut BatchContext, request: &PreviewRequest) -> Outcome {
        eprintln!("Processing file: {}", request.display());

        let path = match normalize(&request.raw_path) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {e}");
                warn!(event = "cascade.path_invalid", code = e.error_code(), error = %e);
                return Outcome::PathInvalid;
            }
        };

        let tool_failed = if let Some(tool) = ctx.tool(self.backend) {
            if self.config.tool.background {
                self.ensure_running(tool);
            }
            match self.request_preview(tool, &path, request.fullscreen) {
                Ok(()) => {
                    eprintln!("Successfully opened: {}", path.original);
                    return Outcome::Previewed { via: Strategy::Tool };
                }
                Err(e) => {
                    eprintln!("{} failed for {}: {e}", self.config.tool.name, path.original);
                    warn!(event = "cascade.request_preview_failed", code = e.error_code(), error = %e);
                    true
                }
            }
        } else {
            let e = PreviewError::ToolNotFound {
                tool: self.config.tool.name.clone(),
            };
            eprintln!("{e}, falling back");
            info!(event = "cascade.tool_not_found", code = e.error_code());
            false
        };

        self.fall_back(&path, request.fullscreen, tool_failed)
    }

    /// Start the background tool if it is not already up. Failures are
    /// logged and otherwise ignored: the preview request is attempted anyway.
    fn ensure_running(&self, tool: &ToolInstallation) {
        let process = tool.process_name();
        if self.backend.is_running(&process) {
            info!(event = "cascade.ensure_running.already_running", process = process.as_str());
            return;
        }

        eprintln!("Starting {}…", self.config.tool.name);
        let started = self
            .backend
            .spawn(&CommandLine::new(&tool.executable))
            .and_then(|_| {
                await_startup(
                    &process,
                    self.config.tool.startup_timeout,
                    self.config.tool.poll_interval,
                    |name| self.backend.is_running(name),
                    |d| self.backend.sleep(d),
                )
            });

        if let Err(e) = started {
            warn!(
                event = "cascade.ensure_running.failed",
                code = e.error_code(),
                error = %e,
                "Sending preview request anyway"
            );
        }
    }

    fn request_preview(
        &self,
        tool: &ToolInstallation,
        path: &ResolvedPath,
        fullscreen: bool,
    ) -> Result<(), PreviewError> {
        let command = CommandLine::preview(tool, &self.config.tool, path, fullscreen);
        info!(event = "cascade.request_preview", command = %command.render());
        self.backend.spawn(&command).map(|_| ())
    }

    fn fall_back(&self, path: &ResolvedPath, fullscreen: bool, tool_failed: bool) -> Outcome {
        let fallback = &self.config.fallback;

        if fallback.window {
            match self.backend.show_window(path, fullscreen) {
                Ok(dismissal) => {
                    info!(event = "cascade.window.dismissed", ?dismissal);
                    return Outcome::Previewed { via: Strategy::BuiltinWindow };
                }
                Err(e) => {
                    warn!(event = "cascade.window.unavailable", code = e.error_code(), error = %e);
                }
            }
        }

        if fallback.default_open {
            return match self.backend.open_default(path) {
                Ok(()) => {
                    eprintln!("Opened with default application: {}", path.original);
                    Outcome::Previewed { via: Strategy::DefaultOpen }
                }
                Err(e) => {
                    eprintln!("Warning: Could not open file with any viewer: {} ({e})", path.original);
                    warn!(event = "cascade.default_open_failed", code = e.error_code(), error = %e);
                    Outcome::LaunchFailed
                }
            };
        }

        if tool_failed {
            Outcome::LaunchFailed
        } else {
            Outcome::ToolUnavailable
        }
    }
}

/// Preview `paths` on this host using `config`.
pub fn open_files<S: AsRef<OsStr>>(paths: &[S], fullscreen: bool, config: &Config) -> BatchReport {
    let backend = SystemBackend::new(config);
    let requests: Vec<PreviewRequest> = paths
        .iter()
        .map(|p| PreviewRequest::new(p.as_ref(), fullscreen))
        .collect();
    Cascade::new(&backend, config).run(&requests)
}
