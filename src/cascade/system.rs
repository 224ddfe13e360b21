use std::time::Duration;

use super::Backend;
use crate::config::Config;
use crate::error::PreviewError;
use crate::path::ResolvedPath;
use crate::process::{self, CommandLine, ProcessHandle};
use crate::tool::{ToolInstallation, ToolLocator};
use crate::window::{self, Dismissal};

/// [`Backend`] backed by the real filesystem, process table and terminal.
#[derive(Debug, Clone)]
pub struct SystemBackend {
    locator: ToolLocator,
}

impl SystemBackend {
    /// A backend that locates the tool described by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            locator: ToolLocator::from_config(&config.tool),
        }
    }
}

impl Backend for SystemBackend {
    fn locate_tool(&self) -> Option<ToolInstallation> {
        self.locator.locate()
    }

    fn is_running(&self, process_name: &str) -> bool {
        process::is_running(process_name)
    }

    fn spawn(&self, command: &CommandLine) -> Result<ProcessHandle, PreviewError> {
        process::spawn(command)
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn show_window(&self, path: &ResolvedPath, fullscreen: bool) -> Result<Dismissal, PreviewError> {
        window::show(path, fullscreen)
    }

    fn open_default(&self, path: &ResolvedPath) -> Result<(), PreviewError> {
        crate::opener::open_default(&path.path)
    }
}
