// trolley - replay purchase intents against a storefront, reconcile the cart

mod exit_codes;
mod reporter;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "trolley")]
#[command(about = "Replay purchase intents against a storefront and reconcile the cart")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  trolley run nightly.toml
  trolley run nightly.toml --json
  trolley run nightly.toml --output report.json")]
    Run {
        /// Path to the run config file
        config: PathBuf,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a run config without touching the storefront
    #[command(after_help = "\
Examples:
  trolley validate nightly.toml")]
    Validate {
        /// Path to the run config file
        config: PathBuf,
    },

    /// Price the intents and show the expected cart, without reconciling
    #[command(after_help = "\
Examples:
  trolley plan nightly.toml
  trolley plan nightly.toml --json")]
    Plan {
        /// Path to the run config file
        config: PathBuf,

        /// Print the plan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Command-level error: exit code plus message, with an optional hint.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
        } => run::cmd_run(config, json, output),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Plan { config, json } => run::cmd_plan(config, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
