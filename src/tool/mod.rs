//! Finding the installed preview tool.

mod expand;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ToolConfig;

/// Where the preview tool was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInstallation {
    /// Absolute path of the tool's executable.
    pub executable: PathBuf,
}

impl ToolInstallation {
    /// Executable base name, as it appears in the process table.
    pub fn process_name(&self) -> String {
        self.executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Probes an ordered list of install locations for the preview tool.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    candidates: Vec<String>,
    program: Option<String>,
}

impl ToolLocator {
    /// Candidates in priority order, plus an optional program name to look up
    /// on `PATH` once every candidate is exhausted.
    pub fn new(candidates: Vec<String>, program: Option<String>) -> Self {
        Self { candidates, program }
    }

    /// Build a locator from the `[tool]` section of the configuration.
    pub fn from_config(tool: &ToolConfig) -> Self {
        Self::new(
            tool.candidates.clone(),
            tool.search_path.then(|| tool.program.clone()),
        )
    }

    /// Find the tool using the process environment.
    pub fn locate(&self) -> Option<ToolInstallation> {
        self.locate_with(|name| std::env::var(name).ok())
    }

    /// Find the tool, resolving placeholders through `lookup`.
    /// The first candidate that expands to an existing regular file wins.
    pub fn locate_with<F>(&self, lookup: F) -> Option<ToolInstallation>
    where
        F: Fn(&str) -> Option<String>,
    {
        for template in &self.candidates {
            let Some(expanded) = expand::expand_env(template, &lookup) else {
                debug!(
                    event = "tool.locate.unresolved",
                    template = template.as_str(),
                    "Skipping candidate with unset variable"
                );
                continue;
            };

            let path = PathBuf::from(expanded);
            if is_regular_file(&path) {
                info!(
                    event = "tool.locate.found",
                    path = %path.display(),
                    "Found preview tool"
                );
                return Some(ToolInstallation { executable: path });
            }
            debug!(event = "tool.locate.miss", path = %path.display());
        }

        let program = self.program.as_deref()?;
        match which::which(program) {
            Ok(path) => {
                info!(
                    event = "tool.locate.found_on_path",
                    path = %path.display(),
                    "Found preview tool on PATH"
                );
                Some(ToolInstallation { executable: path })
            }
            Err(e) => {
                debug!(event = "tool.locate.not_on_path", program, error = %e);
                None
            }
        }
    }
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}
