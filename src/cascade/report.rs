use std::process::ExitCode;

use crate::config::ExitPolicy;
use crate::path::PreviewRequest;

/// Which strategy produced a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The external preview tool.
    Tool,
    /// The built-in window.
    BuiltinWindow,
    /// The OS default application.
    DefaultOpen,
}

/// Terminal state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Some strategy showed the file.
    Previewed {
        /// The strategy that succeeded.
        via: Strategy,
    },
    /// The tool is not installed and no fallback was enabled.
    ToolUnavailable,
    /// Every attempted launch failed.
    LaunchFailed,
    /// The path was empty, malformed or missing.
    PathInvalid,
}

impl Outcome {
    /// Whether the file was shown by any strategy.
    pub const fn is_previewed(self) -> bool {
        matches!(self, Self::Previewed { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Previewed { via: Strategy::Tool } => write!(f, "previewed"),
            Self::Previewed { via: Strategy::BuiltinWindow } => write!(f, "previewed (built-in window)"),
            Self::Previewed { via: Strategy::DefaultOpen } => write!(f, "opened with default application"),
            Self::ToolUnavailable => write!(f, "preview tool unavailable"),
            Self::LaunchFailed => write!(f, "launch failed"),
            Self::PathInvalid => write!(f, "invalid path"),
        }
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    entries: Vec<(PreviewRequest, Outcome)>,
    policy: ExitPolicy,
}

impl BatchReport {
    /// Wrap per-file outcomes with the policy that folds them.
    pub const fn new(entries: Vec<(PreviewRequest, Outcome)>, policy: ExitPolicy) -> Self {
        Self { entries, policy }
    }

    /// Requests paired with their outcomes.
    pub fn entries(&self) -> &[(PreviewRequest, Outcome)] {
        &self.entries
    }

    /// Just the outcomes, in input order.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.entries.iter().map(|(_, o)| *o).collect()
    }

    /// How many files were shown.
    pub fn previewed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_previewed()).count()
    }

    /// Aggregate status under the configured [`ExitPolicy`].
    pub fn succeeded(&self) -> bool {
        let previewed = self.previewed();
        match self.policy {
            ExitPolicy::Any => previewed > 0,
            ExitPolicy::All => !self.entries.is_empty() && previewed == self.entries.len(),
        }
    }

    /// Process exit code for the batch.
    pub fn exit_code(&self) -> ExitCode {
        if self.succeeded() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// One line per file followed by a total.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (request, outcome) in &self.entries {
            out.push_str(&format!("  {}: {outcome}\n", request.display()));
        }
        out.push_str(&format!(
            "Previewed {} of {} file(s)",
            self.previewed(),
            self.entries.len()
        ));
        out
    }
}
