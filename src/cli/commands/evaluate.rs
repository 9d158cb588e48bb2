//! Evaluate command - a saved policy against random play

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::{SideArg, load_policy};
use crate::{
    cli::output::{format_rate, print_kv, print_result, print_section},
    game::Side,
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    players::RandomPlayer,
    value_learning::{LearningAgent, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a saved policy against a random player")]
pub struct EvaluateArgs {
    /// Path to the saved policy
    pub policy: PathBuf,

    /// Side the agent plays (defaults to the side it trained as)
    #[arg(long, value_enum)]
    pub side: Option<SideArg>,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Agent's exploration rate during evaluation
    #[arg(long, default_value_t = 0.0)]
    pub exploration_rate: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// Evaluation outcome from the agent's point of view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub policy: PathBuf,
    pub agent_side: Side,
    pub metadata: TrainingMetadata,
    pub agent_wins: usize,
    pub agent_losses: usize,
    pub agent_win_rate: f64,
    /// Raw tally, counted from White's perspective
    pub result: TrainingResult,
}

impl EvaluationReport {
    fn new(
        policy: PathBuf,
        agent_side: Side,
        metadata: TrainingMetadata,
        result: TrainingResult,
    ) -> Self {
        let (agent_wins, agent_losses, agent_win_rate) = match agent_side {
            Side::White => (result.wins, result.losses, result.win_rate),
            Side::Black => (result.losses, result.wins, result.loss_rate),
        };
        Self {
            policy,
            agent_side,
            metadata,
            agent_wins,
            agent_losses,
            agent_win_rate,
            result,
        }
    }
}

/// Play the saved policy against a random player with learning disabled
pub fn evaluate(args: &EvaluateArgs) -> Result<EvaluationReport> {
    let saved = load_policy(&args.policy)?;
    let metadata = saved.metadata.clone();
    let agent_side = args
        .side
        .map(Side::from)
        .or(metadata.side)
        .unwrap_or(Side::White);

    let mut agent = LearningAgent::from_saved("agent", saved)?;
    agent.set_exploration_rate(args.exploration_rate);
    agent.config().validate()?;
    let mut random = RandomPlayer::new("random");

    let config = TrainingConfig {
        episodes: args.games,
        seed: args.seed,
        log_interval: 0,
    };
    let mut pipeline = TrainingPipeline::new(config).frozen();
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = match agent_side {
        Side::White => pipeline.run(&mut agent, &mut random)?,
        Side::Black => pipeline.run(&mut random, &mut agent)?,
    };

    Ok(EvaluationReport::new(
        args.policy.clone(),
        agent_side,
        metadata,
        result,
    ))
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let report = evaluate(&args)?;

    print_section("Evaluation vs Random");
    print_kv("Policy", &report.policy.display().to_string());
    print_kv("Agent side", &report.agent_side.to_string());
    print_kv(
        "Trained episodes",
        &report.metadata.episodes_trained.to_string(),
    );

    match report.agent_side {
        Side::White => print_result(&report.result, "Agent wins", "Agent losses"),
        Side::Black => print_result(&report.result, "Agent losses", "Agent wins"),
    }
    print_kv("Agent score", &format_rate(report.agent_win_rate));

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        print_kv("Exported", &path.display().to_string());
    }

    Ok(())
}
