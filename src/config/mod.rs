//! User configuration, stored as TOML under the platform config directory.

mod ops;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User configuration, read from `~/.config/quickpreview/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The external preview tool and how to talk to it.
    pub tool: ToolConfig,
    /// Which fallback strategies are enabled.
    pub fallback: FallbackConfig,
    /// Batch-level policy.
    pub batch: BatchConfig,
}

/// Tool profile: where to find the preview tool and its argument protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Display name used in status lines, e.g. "QuickLook"
    pub name: String,
    /// Program name looked up on `PATH` when `search_path` is set.
    pub program: String,
    /// Install locations in priority order. `%VAR%`, `$VAR`, `${VAR}` and a
    /// leading `~` are expanded.
    pub candidates: Vec<String>,
    /// Arguments for a preview request; `{path}` is replaced by the file.
    pub preview_args: Vec<String>,
    /// Appended after `preview_args` in fullscreen mode.
    pub fullscreen_args: Vec<String>,
    /// The tool runs as a resident process that must be started before it
    /// accepts preview requests.
    pub background: bool,
    /// Fall back to a `PATH` lookup of `program` after the candidates.
    pub search_path: bool,
    /// How long to wait for a freshly started background tool to appear.
    #[serde(with = "humantime_serde")]
    pub startup_timeout: Duration,
    /// How often to re-check while waiting.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

/// Strategies tried after the external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Show the built-in preview window.
    pub window: bool,
    /// Open with the OS default application.
    pub default_open: bool,
}

/// Batch-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// How per-file outcomes fold into the exit status.
    pub exit_policy: ExitPolicy,
}

/// How a batch's per-file outcomes map to the process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Success if at least one file was previewed.
    #[default]
    Any,
    /// Success only if every file was previewed.
    All,
}

impl std::fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for ExitPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => anyhow::bail!("Invalid exit policy: {s} (expected \"any\" or \"all\")"),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        platform_tool()
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            window: true,
            default_open: true,
        }
    }
}

const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

// ──────────────────────────── Windows ────────────────────────────

#[cfg(target_os = "windows")]
fn platform_tool() -> ToolConfig {
    ToolConfig {
        name: "QuickLook".to_string(),
        program: "QuickLook.exe".to_string(),
        candidates: strings(&[
            r"%LOCALAPPDATA%\Programs\QuickLook\QuickLook.exe",
            r"%ProgramFiles%\QuickLook\QuickLook.exe",
            r"%ProgramFiles(x86)%\QuickLook\QuickLook.exe",
        ]),
        preview_args: strings(&["/preview:\"{path}\""]),
        fullscreen_args: strings(&["/fullscreen"]),
        background: true,
        search_path: false,
        startup_timeout: STARTUP_TIMEOUT,
        poll_interval: POLL_INTERVAL,
    }
}

// ──────────────────────────── macOS ────────────────────────────

#[cfg(target_os = "macos")]
fn platform_tool() -> ToolConfig {
    ToolConfig {
        name: "Quick Look".to_string(),
        program: "qlmanage".to_string(),
        candidates: strings(&["/usr/bin/qlmanage"]),
        preview_args: strings(&["-p", "{path}"]),
        fullscreen_args: Vec::new(),
        background: false,
        search_path: true,
        startup_timeout: STARTUP_TIMEOUT,
        poll_interval: POLL_INTERVAL,
    }
}

// ──────────────────────────── Linux & others ────────────────────────────

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_tool() -> ToolConfig {
    ToolConfig {
        name: "Sushi".to_string(),
        program: "sushi".to_string(),
        candidates: strings(&[
            "$HOME/.local/bin/sushi",
            "/usr/bin/sushi",
            "/usr/local/bin/sushi",
            "/usr/libexec/sushi",
        ]),
        preview_args: strings(&["{path}"]),
        fullscreen_args: strings(&["-f"]),
        background: false,
        search_path: true,
        startup_timeout: STARTUP_TIMEOUT,
        poll_interval: POLL_INTERVAL,
    }
}
