mod cli;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use sizeband::error::ConfigError;
use sizeband::pipeline::{ReportRequest, generate_report};
use sizeband::scanner::VerboseProgress;
use sizeband::util::format_size;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(config) = err.downcast_ref::<ConfigError>() {
                eprintln!("Error: {}", config);
                return ExitCode::from(config.exit_code());
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let request = ReportRequest::new(
        &cli.root,
        &cli.output,
        &cli.file_divisions,
        &cli.folder_divisions,
    )?
    .follow_symlinks(cli.follow_symlinks);

    eprintln!("Analyzing {}", request.root.display());
    let summary = generate_report(&request, &VerboseProgress::new(!cli.quiet))?;

    eprintln!(
        "Finished calculating {} files, {} directories ({})",
        summary.files,
        summary.dirs,
        format_size(summary.total_size)
    );
    if summary.errors > 0 {
        eprintln!("{} entries could not be read, see warnings above", summary.errors);
    }
    if summary.patched {
        eprintln!("Report written to {}", request.output.display());
    } else {
        eprintln!(
            "Report written to {} without its summary block",
            request.output.display()
        );
    }
    Ok(())
}
