//! `tutor`: solve task records with the step-by-step engine.

mod commands;
mod config;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tutor_engine::{Registry, Router};

use commands::check::CheckArgs;
use commands::solve::SolveArgs;
use commands::EXIT_ERROR;
use config::TutorConfig;

#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(about = "Step-by-step solutions for exam task patterns")]
#[command(version)]
struct Cli {
    /// Configuration file (optional)
    #[arg(long, global = true, default_value = "tutor_config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one task and print its solution
    Solve(SolveArgs),
    /// Solve a task bank and verify every answer against its ground truth
    Check(CheckArgs),
    /// List registered task patterns
    Patterns,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, problem) = TutorConfig::load(&cli.config);
    logging::init_logging(&config.logging.level);
    if let Some(problem) = problem {
        tracing::warn!(
            target: "config",
            path = %cli.config.display(),
            problem = %problem,
            "config_defaults_used"
        );
    }

    let router = Router::new(Registry::with_builtin_procedures(), config.engine);

    let result = match &cli.command {
        Command::Solve(args) => commands::solve::run(args, &router),
        Command::Check(args) => commands::check::run(args, &router),
        Command::Patterns => Ok(commands::patterns::run(&router)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
