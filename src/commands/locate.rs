use std::process::ExitCode;

use anyhow::Result;
use quickpreview::{config::Config, process, tool::ToolLocator};

pub fn cmd_locate() -> Result<ExitCode> {
    let config = Config::load()?;

    let Some(tool) = ToolLocator::from_config(&config.tool).locate() else {
        println!("{} is not installed. Searched:", config.tool.name);
        for candidate in &config.tool.candidates {
            println!("  {candidate}");
        }
        if config.tool.search_path {
            println!("  {} on PATH", config.tool.program);
        }
        return Ok(ExitCode::FAILURE);
    };

    println!("{} found at {}", config.tool.name, tool.executable.display());
    if config.tool.background {
        let process = tool.process_name();
        let state = if process::is_running(&process) { "running" } else { "not running" };
        println!("Background process {process}: {state}");
    }
    Ok(ExitCode::SUCCESS)
}
