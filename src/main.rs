use agrinexus_rs::pipeline::outlet;
use agrinexus_rs::{DiagnosisError, cli, launch};
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = cli::Args::parse();
    let config = args.into_config()?;
    init_tracing(config.verbose)?;

    let report = match launch(&config).await {
        Ok(report) => report,
        Err(err) if err.downcast_ref::<DiagnosisError>().is_some() => {
            eprintln!("❌ FATAL: {}", err);
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err),
    };

    outlet::save(&config, &report)?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("AGRINEXUS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
