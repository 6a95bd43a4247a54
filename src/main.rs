use anyhow::Context;
use clap::Parser;
use llava_cli::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    llava_cli::logging::init(args.verbose);

    // One request, one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(cli::execute(&args));

    let code = cli::report(
        outcome,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    Ok(ExitCode::from(code))
}
