use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use playground_cli::config::{Cli, Command};
use playground_cli::Session;
use playground_core::MessageColor;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let session = Session::new(cli.server, cli.timeout.map(Duration::from_secs))?;

    match cli.command {
        Command::Templates => {
            for key in session.templates() {
                println!("{key}");
            }
        }
        Command::Show { key } => print!("{}", session.show(&key)?),
        Command::Send(args) => println!("{}", session.send(&args)?),
        Command::Upload(args) => {
            let view = session.upload(args.order_data.as_deref(), args.driver_data.as_deref())?;
            println!("{}", view.message);
            if view.message_color != Some(MessageColor::Success) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
