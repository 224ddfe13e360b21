//! Opening a file with the application the OS associates with it.

use std::path::Path;

use tracing::debug;

use crate::error::PreviewError;
use crate::process::CommandLine;

/// Open `path` with the application the OS associates with it.
///
/// Waits for the platform launcher (`open`, `xdg-open`, `rundll32`) to return
/// so a missing association surfaces as an error; the application it starts
/// is not waited on.
pub fn open_default(path: &Path) -> Result<(), PreviewError> {
    let launcher = launcher_for(std::env::consts::OS, path)?;
    debug!(
        event = "opener.default_open.started",
        path = %path.display(),
        command = %launcher.render()
    );

    let status = launcher
        .to_command()
        .status()
        .map_err(|e| PreviewError::launch(&launcher.program, e))?;

    if !status.success() {
        return Err(PreviewError::ExitedWithFailure {
            program: launcher.program,
            code: status.code(),
        });
    }
    Ok(())
}

/// The default-open command for `os` (a `std::env::consts::OS` value).
///
/// Windows goes through the shell's file protocol handler rather than
/// `cmd /C start`, so `&`, `^` and `%` in file names are never interpreted.
fn launcher_for(os: &str, path: &Path) -> Result<CommandLine, PreviewError> {
    let path = path.to_string_lossy();
    let launcher = match os {
        "macos" => CommandLine::new("open"),
        "windows" => CommandLine::new("rundll32").arg("url.dll,FileProtocolHandler"),
        "linux" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" => CommandLine::new("xdg-open"),
        other => {
            return Err(PreviewError::launch(
                "open",
                std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    format!("default open is not implemented for {other}"),
                ),
            ));
        }
    };
    Ok(launcher.arg(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Arg;

    #[test]
    fn windows_path_with_shell_metacharacters_is_one_literal_argument() {
        let launcher = launcher_for("windows", Path::new(r"C:\img\a&b.png")).unwrap();

        assert_eq!(launcher.program, Path::new("rundll32"));
        assert_eq!(
            launcher.args.last(),
            Some(&Arg::Value(r"C:\img\a&b.png".to_string()))
        );
        assert!(launcher.args.iter().all(|a| a.as_str() != "/C"));
        insta::assert_snapshot!(launcher.render(), @r"rundll32 url.dll,FileProtocolHandler C:\img\a&b.png");
    }

    #[test]
    fn windows_path_with_spaces_is_quoted() {
        let launcher = launcher_for("windows", Path::new(r"C:\My Files\100%.png")).unwrap();
        insta::assert_snapshot!(
            launcher.render(),
            @r#"rundll32 url.dll,FileProtocolHandler "C:\My Files\100%.png""#
        );
    }

    #[test]
    fn unix_launchers_take_the_path_as_sole_argument() {
        let mac = launcher_for("macos", Path::new("/tmp/a b.png")).unwrap();
        assert_eq!(mac.program, Path::new("open"));
        assert_eq!(mac.args, vec![Arg::Value("/tmp/a b.png".to_string())]);

        let linux = launcher_for("linux", Path::new("/tmp/a.png")).unwrap();
        assert_eq!(linux.program, Path::new("xdg-open"));
    }

    #[test]
    fn unknown_platform_is_a_launch_failure() {
        let err = launcher_for("plan9", Path::new("/tmp/a.png")).unwrap_err();
        assert!(matches!(err, PreviewError::LaunchFailed { code: None, .. }));
    }
}
