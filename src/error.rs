//! Errors raised while previewing a file.

use std::path::PathBuf;
use std::time::Duration;

/// Why a path handed to the previewer was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PathProblem {
    /// The argument was an empty string.
    #[error("path is empty")]
    Empty,

    /// The argument is not valid Unicode and cannot be placed on a command line.
    #[error("path is not valid Unicode")]
    NotUnicode,

    /// The argument contains an interior NUL byte.
    #[error("path contains a NUL byte")]
    Nul,

    /// The OS reported the path missing or inaccessible.
    #[error("file not found or inaccessible: {0}")]
    Inaccessible(#[source] std::io::Error),
}

/// Every failure the preview cascade can observe.
///
/// None of these escape a single file's processing: the cascade turns each one
/// into a fallback transition or a recorded outcome.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The input path could not be normalised.
    #[error("invalid path '{path}': {problem}")]
    PathInvalid {
        /// The path as the user supplied it (lossily decoded).
        path: String,
        /// What was wrong with it.
        #[source]
        problem: PathProblem,
    },

    /// No candidate install location held the preview tool.
    #[error("preview tool '{tool}' is not installed")]
    ToolNotFound {
        /// Display name of the tool.
        tool: String,
    },

    /// The process table could not be read. Callers treat this as "not running".
    #[error("could not enumerate running processes: {message}")]
    ProcessEnumerationFailed {
        /// Human-readable cause.
        message: String,
    },

    /// The OS refused to start a process.
    #[error("failed to launch '{}' (os error {code:?}): {source}", .program.display())]
    LaunchFailed {
        /// Program that failed to start.
        program: PathBuf,
        /// Raw OS error code, when the host supplied one.
        code: Option<i32>,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// A launched helper ran but reported failure.
    #[error("'{}' exited with status {code:?}", .program.display())]
    ExitedWithFailure {
        /// Program that ran.
        program: PathBuf,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },

    /// The background tool did not appear in the process table in time.
    #[error("'{process}' did not start within {waited:?}")]
    PreviewTimeout {
        /// Process base name that was polled for.
        process: String,
        /// How long the launcher waited.
        waited: Duration,
    },

    /// The built-in preview window could not be shown.
    #[error("built-in preview window unavailable: {message}")]
    WindowUnavailable {
        /// Human-readable cause.
        message: String,
    },
}

impl PreviewError {
    /// Stable machine-readable code, used as a structured log field.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PathInvalid { .. } => "PATH_INVALID",
            Self::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            Self::ProcessEnumerationFailed { .. } => "PROCESS_ENUMERATION_FAILED",
            Self::LaunchFailed { .. } | Self::ExitedWithFailure { .. } => "LAUNCH_FAILED",
            Self::PreviewTimeout { .. } => "PREVIEW_TIMEOUT",
            Self::WindowUnavailable { .. } => "WINDOW_UNAVAILABLE",
        }
    }

    pub(crate) fn launch(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            code: source.raw_os_error(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_failure_carries_os_code() {
        let err = PreviewError::launch("tool.exe", std::io::Error::from_raw_os_error(2));
        match &err {
            PreviewError::LaunchFailed { code, .. } => assert_eq!(*code, Some(2)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(err.error_code(), "LAUNCH_FAILED");
    }

    #[test]
    fn path_invalid_message_names_the_path() {
        let err = PreviewError::PathInvalid {
            path: "missing.png".into(),
            problem: PathProblem::Empty,
        };
        assert_eq!(err.to_string(), "invalid path 'missing.png': path is empty");
    }
}
