//! `quickpreview` command-line entry point.

mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::config::ConfigAction;
use quickpreview::logging;

#[derive(Parser)]
#[command(
    name = "quickpreview",
    version,
    about = "Preview files with the best available native viewer"
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview one or more files
    Open {
        /// Files to preview
        #[arg(value_name = "FILE", required = true)]
        files: Vec<OsString>,

        /// Open the preview fullscreen
        #[arg(short, long)]
        fullscreen: bool,

        /// After the batch, step through the files with the arrow keys
        #[arg(long)]
        browse: bool,
    },

    /// Show where the preview tool is installed and whether it is running
    Locate,

    /// Manage quickpreview configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Open {
            files,
            fullscreen,
            browse,
        } => commands::open::cmd_open(files, fullscreen, browse),
        Commands::Locate => commands::locate::cmd_locate(),
        Commands::Config { action } => {
            commands::config::cmd_config(action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
