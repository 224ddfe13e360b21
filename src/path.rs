//! Turning user-supplied arguments into absolute, existing paths.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{PathProblem, PreviewError};

/// One file the user asked to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// The argument exactly as received.
    pub raw_path: OsString,
    /// Whether the preview should open fullscreen.
    pub fullscreen: bool,
}

impl PreviewRequest {
    /// Build a request from any path-like argument.
    pub fn new(raw_path: impl Into<OsString>, fullscreen: bool) -> Self {
        Self {
            raw_path: raw_path.into(),
            fullscreen,
        }
    }

    /// The raw path for status lines, lossily decoded.
    pub fn display(&self) -> String {
        self.raw_path.to_string_lossy().into_owned()
    }
}

/// A path that has been validated to exist and converted to an absolute,
/// Unicode-representable form suitable for a tool's command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// What the user typed.
    pub original: String,
    /// Absolute native path.
    pub path: PathBuf,
    text: String,
}

impl ResolvedPath {
    /// The absolute path as text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Just the final component, falling back to the whole path.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or(&self.text)
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Convert a user-supplied path into a [`ResolvedPath`].
///
/// Fails with [`PreviewError::PathInvalid`] when the input is empty, is not
/// valid Unicode, contains a NUL byte, or does not exist. The only side
/// effect is a read-only metadata lookup.
pub fn normalize(raw: &OsStr) -> Result<ResolvedPath, PreviewError> {
    let invalid = |problem| PreviewError::PathInvalid {
        path: raw.to_string_lossy().into_owned(),
        problem,
    };

    if raw.is_empty() {
        return Err(invalid(PathProblem::Empty));
    }
    let original = raw.to_str().ok_or_else(|| invalid(PathProblem::NotUnicode))?;
    if original.contains('\0') {
        return Err(invalid(PathProblem::Nul));
    }

    std::fs::metadata(original).map_err(|e| invalid(PathProblem::Inaccessible(e)))?;

    let path = std::path::absolute(original).map_err(|e| invalid(PathProblem::Inaccessible(e)))?;
    let text = path
        .to_str()
        .ok_or_else(|| invalid(PathProblem::NotUnicode))?
        .to_string();

    Ok(ResolvedPath {
        original: original.to_string(),
        path,
        text,
    })
}
