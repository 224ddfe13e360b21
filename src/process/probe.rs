//! Checking the process table for a running executable.

use std::ffi::OsString;

use sysinfo::{ProcessesToUpdate, System};
use tracing::{debug, warn};

use crate::error::PreviewError;

/// Check whether any running process has the executable base name `name`.
///
/// Fails open: when the process table cannot be read the tool is reported as
/// not running, which at worst causes a redundant launch.
pub fn is_running(name: &str) -> bool {
    running_in(process_names().as_deref(), name)
}

fn running_in(names: Result<&[OsString], &PreviewError>, name: &str) -> bool {
    match names {
        Ok(names) => {
            let running = names
                .iter()
                .any(|actual| names_match(&actual.to_string_lossy(), name, cfg!(windows)));
            debug!(event = "process.probe.checked", name, running);
            running
        }
        Err(e) => {
            warn!(
                event = "process.probe.enumeration_failed",
                code = e.error_code(),
                error = %e,
                "Treating preview tool as not running"
            );
            false
        }
    }
}

fn process_names() -> Result<Vec<OsString>, PreviewError> {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(PreviewError::ProcessEnumerationFailed {
            message: "process enumeration is not supported on this platform".to_string(),
        });
    }

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    Ok(system
        .processes()
        .values()
        .map(|p| p.name().to_os_string())
        .collect())
}

/// Extract the base name from a path, handling both Unix (/) and Windows (\) separators
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Compare two executable names. Windows matching ignores case and an `.exe`
/// suffix on either side.
fn names_match(actual: &str, expected: &str, windows_rules: bool) -> bool {
    let actual = base_name(actual);
    let expected = base_name(expected);

    if !windows_rules {
        return actual == expected;
    }

    let strip = |s: &str| -> String {
        let lower = s.to_ascii_lowercase();
        lower.strip_suffix(".exe").map(str::to_string).unwrap_or(lower)
    };
    strip(actual) == strip(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_matching_is_exact() {
        assert!(names_match("sushi", "sushi", false));
        assert!(!names_match("Sushi", "sushi", false));
        assert!(!names_match("sushi-helper", "sushi", false));
    }

    #[test]
    fn windows_matching_ignores_case_and_extension() {
        assert!(names_match("QuickLook.exe", "quicklook.EXE", true));
        assert!(names_match("QuickLook", "QuickLook.exe", true));
        assert!(!names_match("QuickLook.Plugin.exe", "QuickLook.exe", true));
    }

    #[test]
    fn paths_are_reduced_to_base_names() {
        assert!(names_match(r"C:\Tools\QuickLook.exe", "QuickLook.exe", true));
        assert!(names_match("/usr/bin/sushi", "sushi", false));
    }

    #[test]
    fn enumeration_failure_reads_as_not_running() {
        let failed = PreviewError::ProcessEnumerationFailed {
            message: "process table unreadable".to_string(),
        };
        assert!(!running_in(Err(&failed), "sushi"));
    }

    #[test]
    fn listed_process_is_running() {
        let names = vec![OsString::from("bash"), OsString::from("sushi")];
        assert!(running_in(Ok(&names), "sushi"));
        assert!(!running_in(Ok(&[]), "sushi"));
    }

    #[test]
    fn nonexistent_process_is_not_running() {
        assert!(!is_running("quickpreview-no-such-process-7f3a"));
    }
}
