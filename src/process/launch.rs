//! Building, quoting and starting preview command lines.

use std::borrow::Cow;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, info};

use super::ProcessHandle;
use crate::config::ToolConfig;
use crate::error::PreviewError;
use crate::path::ResolvedPath;
use crate::tool::ToolInstallation;

const PATH_PLACEHOLDER: &str = "{path}";

/// One argument of a [`CommandLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A plain value, quoted and escaped when rendered.
    Value(String),
    /// Command-line text that already carries its own quoting, such as
    /// `/preview:"C:\My File.png"`. Rendered as is.
    Verbatim(String),
}

impl Arg {
    /// The argument's text before rendering.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(s) | Self::Verbatim(s) => s,
        }
    }

    fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Value(s) => quote_arg(s),
            Self::Verbatim(s) => Cow::Borrowed(s),
        }
    }
}

/// A program plus its arguments, kept as separate tokens until launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments in order.
    pub args: Vec<Arg>,
}

impl CommandLine {
    /// A command line with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one plain argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Value(arg.into()));
        self
    }

    /// The preview request for `path`: the profile's `preview_args` with
    /// `{path}` substituted, then `fullscreen_args` when requested.
    ///
    /// A template containing `"` is command-line text: the path is escaped for
    /// the position it lands in and the result is passed through verbatim.
    /// Any other template becomes a plain value.
    pub fn preview(
        tool: &ToolInstallation,
        profile: &ToolConfig,
        path: &ResolvedPath,
        fullscreen: bool,
    ) -> Self {
        let mut args: Vec<Arg> = profile
            .preview_args
            .iter()
            .map(|template| substitute(template, path.as_str()))
            .collect();
        if fullscreen {
            args.extend(profile.fullscreen_args.iter().cloned().map(Arg::Value));
        }
        Self {
            program: tool.executable.clone(),
            args,
        }
    }

    /// The whole invocation as a single string, each token quoted as needed.
    pub fn render(&self) -> String {
        let program = self.program.to_string_lossy();
        std::iter::once(quote_arg(&program))
            .chain(self.args.iter().map(Arg::render))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        // Windows hands the child one command-line string; pass our own
        // rendering through untouched so protocol text like `/preview:"..."`
        // arrives exactly as built.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            for arg in &self.args {
                cmd.raw_arg(arg.render().as_ref());
            }
            cmd.creation_flags(DETACHED_PROCESS);
        }
        #[cfg(not(windows))]
        cmd.args(self.args.iter().map(Arg::as_str));

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

fn substitute(template: &str, path: &str) -> Arg {
    if !template.contains('"') {
        return Arg::Value(template.replace(PATH_PLACEHOLDER, path));
    }

    let mut out = String::with_capacity(template.len() + path.len());
    let mut rest = template;
    let mut in_quotes = false;
    while let Some(at) = rest.find(PATH_PLACEHOLDER) {
        let before = &rest[..at];
        in_quotes ^= before.matches('"').count() % 2 == 1;
        out.push_str(before);
        rest = &rest[at + PATH_PLACEHOLDER.len()..];
        if in_quotes {
            escape_quoted_into(&mut out, path, rest.starts_with('"'));
        } else {
            out.push_str(&quote_arg(path));
        }
    }
    out.push_str(rest);
    Arg::Verbatim(out)
}

/// Render `arg` as one command-line token.
///
/// Arguments that are non-empty and free of whitespace and `"` pass through
/// unchanged. Anything else is wrapped in quotes with inner quotes escaped and
/// the backslashes before any quote doubled, so the tool reads back exactly
/// `arg`.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"') {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    escape_quoted_into(&mut quoted, arg, true);
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Append `text` for use between a pair of quotes: `"` becomes `\"` and a run
/// of backslashes right before a quote is doubled. `closing` says whether a
/// quote follows `text`.
fn escape_quoted_into(out: &mut String, text: &str, closing: bool) {
    let mut backslashes = 0;
    for c in text.chars() {
        match c {
            '\\' => {
                backslashes += 1;
                continue;
            }
            '"' => out.push_str(&"\\".repeat(backslashes * 2 + 1)),
            _ => out.push_str(&"\\".repeat(backslashes)),
        }
        backslashes = 0;
        out.push(c);
    }
    let trailing = if closing { backslashes * 2 } else { backslashes };
    out.push_str(&"\\".repeat(trailing));
}

/// Start `command` detached from the caller. Nothing waits for it to exit.
pub fn spawn(command: &CommandLine) -> Result<ProcessHandle, PreviewError> {
    debug!(event = "process.launch.started", command = %command.render());

    let child = command
        .to_command()
        .spawn()
        .map_err(|e| PreviewError::launch(&command.program, e))?;
    let handle = ProcessHandle { pid: child.id() };
    drop(child);

    info!(
        event = "process.launch.completed",
        pid = handle.pid,
        program = %command.program.display()
    );
    Ok(handle)
}

/// Poll `probe` until `process` shows up or `timeout` has elapsed.
///
/// Time is accounted by the intervals handed to `sleep`, so a fake sleeper
/// makes this deterministic.
pub fn await_startup<P, S>(
    process: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: P,
    mut sleep: S,
) -> Result<(), PreviewError>
where
    P: FnMut(&str) -> bool,
    S: FnMut(Duration),
{
    let interval = interval.max(Duration::from_millis(1));
    let mut waited = Duration::ZERO;

    loop {
        if probe(process) {
            debug!(event = "process.startup.ready", process, ?waited);
            return Ok(());
        }
        if waited >= timeout {
            return Err(PreviewError::PreviewTimeout {
                process: process.to_string(),
                waited,
            });
        }
        let step = interval.min(timeout - waited);
        sleep(step);
        waited += step;
    }
}
