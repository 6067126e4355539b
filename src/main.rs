use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cli::{InspectArgs, RunArgs};

mod cli;
mod run;

#[derive(Parser)]
#[command(version, about = "Particle-based viscoelastic fluid simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation, optionally recording every step.
    Run(RunArgs),
    /// Summarize a recorded run.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run::run(&args),
        Commands::Inspect(args) => run::inspect(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        },
    }
}
