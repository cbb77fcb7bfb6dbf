use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docker_run::config;
use docker_run::docker::DockerCli;
use docker_run::pipeline;

/// Manage Docker containers based on YAML configurations.
///
/// Reads ~/.config/docker-run/<CONFIG_NAME>.yml (or .yaml), creates any
/// missing networks and volumes, then starts the container detached.
#[derive(Parser, Debug)]
#[command(name = "docker-run", about, long_about)]
struct Cli {
    /// Name of the configuration file (without extension).
    config_name: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dir = config::config_dir()?;
    let runtime = DockerCli::from_env();

    let report = pipeline::launch(&runtime, &dir, &cli.config_name)?;
    if let Some(container) = report.container {
        println!("{}", container.id);
    }
    Ok(())
}
