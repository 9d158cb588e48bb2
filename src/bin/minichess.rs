//! MiniChess CLI
//!
//! This CLI provides a unified interface for:
//! - Training agents by self-play
//! - Playing against a trained agent
//! - Evaluating saved policies against random play
//! - Inspecting saved policies

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minichess")]
#[command(version, about = "4x4 MiniChess with a self-play learning agent", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train agents by self-play (or against random play)
    Train(minichess::cli::commands::train::TrainArgs),

    /// Play against an agent in the terminal
    Play(minichess::cli::commands::play::PlayArgs),

    /// Evaluate a saved policy against a random player
    Evaluate(minichess::cli::commands::evaluate::EvaluateArgs),

    /// Show the settings and best-valued states of a saved policy
    Inspect(minichess::cli::commands::inspect::InspectArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => minichess::cli::commands::train::execute(args),
        Commands::Play(args) => minichess::cli::commands::play::execute(args),
        Commands::Evaluate(args) => minichess::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => minichess::cli::commands::inspect::execute(args),
    }
}
