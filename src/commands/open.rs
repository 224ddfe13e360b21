use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use quickpreview::{
    browse,
    cascade::{open_files, BatchContext, Cascade, SystemBackend},
    config::Config,
    path::PreviewRequest,
};

pub fn cmd_open(files: Vec<OsString>, fullscreen: bool, browse: bool) -> Result<ExitCode> {
    let config = Config::load()?;
    eprintln!("Opening {} file(s) with {}…", files.len(), config.tool.name);

    if !browse || files.len() < 2 {
        let report = open_files(&files, fullscreen, &config);
        eprintln!("\n{}", report.summary());
        return Ok(report.exit_code());
    }

    let backend = SystemBackend::new(&config);
    let cascade = Cascade::new(&backend, &config);

    let requests: Vec<PreviewRequest> = files
        .into_iter()
        .map(|f| PreviewRequest::new(f, fullscreen))
        .collect();

    let report = cascade.run(&requests);
    eprintln!("\n{}", report.summary());

    let mut ctx = BatchContext::default();
    browse::run(requests.len(), |index| {
        let outcome = cascade.preview_one(&mut ctx, &requests[index]);
        eprintln!("  {}: {outcome}", requests[index].display());
    })
    .context("Failed to read navigation keys")?;

    Ok(report.exit_code())
}
