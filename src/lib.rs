//! Preview files with the best available native viewer.
//!
//! Each file goes through a fallback cascade: an external preview tool
//! (QuickLook, Sushi, `qlmanage`), then a built-in terminal window, then the
//! OS default application. One file's failure never stops the batch.

pub mod browse;
pub mod cascade;
pub mod config;
pub mod error;
pub mod logging;
pub mod opener;
pub mod path;
pub mod process;
pub mod tool;
pub mod window;

pub use cascade::{open_files, BatchReport, Cascade, Outcome};
pub use config::Config;
pub use error::PreviewError;
pub use path::PreviewRequest;
