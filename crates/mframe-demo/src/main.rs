#![forbid(unsafe_code)]

//! Scripted headless driver for the Microframe overlay.
//!
//! Reads a command script (see [`script`]) from a file or stdin, runs it
//! against a [`mframe::HeadlessPresenter`] on a virtual clock and prints one
//! line per command.

mod driver;
mod script;

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::driver::Driver;

#[derive(Debug, Parser)]
#[command(
    name = "mframe-demo",
    about = "Drive the Microframe overlay from a command script",
    version
)]
struct Cli {
    /// Script file. Reads stdin when omitted.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Overlay configuration (`.toml` or `.json`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit newline-delimited JSON logs to stderr.
    #[arg(long)]
    json_logs: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "mframe=info")]
    log_filter: String,
}

fn init_logging(cli: &Cli) {
    if cli.json_logs {
        mframe::core::logging::init_json_subscriber();
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_script(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => mframe::load_config(path)?,
        None => mframe::OverlayConfig::default(),
    };
    let source = read_script(cli.script.as_ref())?;
    let commands = script::parse(&source)?;
    tracing::debug!(commands = commands.len(), "script parsed");

    let mut driver = Driver::new(config);
    for command in &commands {
        println!("{}", driver.run(command));
    }
    if driver.overlay().is_open() {
        println!("{}", driver.describe());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("mframe-demo: {error}");
            ExitCode::FAILURE
        }
    }
}
