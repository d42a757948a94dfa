mod commands;
mod interactive;

use api_scaffold_core::{ScaffoldConfig, ScaffoldError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use commands::make_service::{self, MakeServiceArgs};
use interactive::Format;

#[derive(Parser)]
#[command(name = "api-scaffold")]
#[command(about = "Laravel service layer and API scaffolding")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to config/api-scaffold.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new service class with optional API scaffolding
    #[command(name = "make:service-api")]
    MakeServiceApi(MakeServiceArgs),
}

/// Priority: RUST_LOG > `-v` > config `log_level` > warn.
fn init_logging(log_level: Option<&str>, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        log_level.unwrap_or("warn")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), ScaffoldError> {
    let project_root = std::env::current_dir()?;

    // Configuration comes first so its log level applies
    let config = match ScaffoldConfig::load(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(None, cli.verbose);
            return Err(e);
        }
    };
    init_logging(config.log_level.as_deref(), cli.verbose);

    match cli.command {
        Commands::MakeServiceApi(args) => make_service::run(&project_root, config, args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_cancelled() {
                Format::warning("Operation cancelled.");
            } else {
                Format::error(&e.to_string());
            }
            ExitCode::from(e.exit_code())
        }
    }
}
