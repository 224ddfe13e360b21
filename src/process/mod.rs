//! Process enumeration and detached process launching.

pub mod launch;
pub mod probe;

pub use launch::{await_startup, quote_arg, spawn, Arg, CommandLine};
pub use probe::is_running;

/// A process started by the launcher. The launcher keeps nothing but the pid;
/// the child's handles are released as soon as it has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    /// OS process id.
    pub pid: u32,
}
