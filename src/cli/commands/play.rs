//! Play command - a human against a learning agent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{SideArg, load_policy, save_policy};
use crate::{
    cli::output::{print_kv, print_result, print_section},
    game::{Board, GameOutcome, Move, Side},
    pipeline::{TrainingConfig, TrainingPipeline},
    players::HumanPlayer,
    ports::Observer,
    types::StateKey,
    value_learning::{LearningAgent, LearningConfig, SavedPolicy, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Saved policy for the agent (an untrained agent is used if omitted)
    #[arg(long, short = 'p')]
    pub policy: Option<PathBuf>,

    /// Side the human plays
    #[arg(long, value_enum, default_value_t = SideArg::White)]
    pub side: SideArg,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Agent's exploration rate during play
    #[arg(long, default_value_t = 0.0)]
    pub exploration_rate: f64,

    /// Random seed for the agent's tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let the agent learn from these games and save its policy here
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Prints the board after every move and announces the result
struct BoardPrinter {
    human: Side,
}

impl Observer for BoardPrinter {
    fn on_episode_start(&mut self, episode: usize) -> crate::Result<()> {
        println!("\nGame {}: you play {}", episode + 1, self.human);
        println!("{}", Board::initial());
        Ok(())
    }

    fn on_move(
        &mut self,
        _episode: usize,
        ply: u32,
        side: Side,
        mv: Move,
        state: &StateKey,
    ) -> crate::Result<()> {
        println!("\n{ply}. {side} plays {mv}");
        println!("{}", Board::from_state_key(state));
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: GameOutcome,
        plies: u32,
    ) -> crate::Result<()> {
        match outcome {
            GameOutcome::Win(side) if side == self.human => {
                println!("\nYou win ({side}) after {plies} plies!")
            }
            GameOutcome::Win(side) => println!("\nThe agent wins ({side}) after {plies} plies."),
            GameOutcome::Draw => println!("\nDraw after {plies} plies."),
        }
        Ok(())
    }
}

/// Snapshot the agent's values under its trained hyperparameters, not the
/// play-time exploration rate
fn policy_to_save(
    agent: &LearningAgent,
    trained: LearningConfig,
    metadata: TrainingMetadata,
) -> SavedPolicy {
    SavedPolicy::new(trained, metadata, agent.values().clone())
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_side = Side::from(args.side);

    let (mut agent, previous) = match &args.policy {
        Some(path) => {
            let saved = load_policy(path)?;
            let previous = saved.metadata.episodes_trained;
            (LearningAgent::from_saved("agent", saved)?, previous)
        }
        None => (LearningAgent::new("agent", LearningConfig::default()), 0),
    };
    let trained = *agent.config();
    agent.set_exploration_rate(args.exploration_rate);
    agent.config().validate()?;

    print_section("MiniChess");
    print_kv("You play", &human_side.to_string());
    print_kv("Agent states", &agent.values().len().to_string());
    println!("\nWhite pieces are upper-case (R K P), Black pieces lower-case (r k p).");

    let config = TrainingConfig {
        episodes: args.games,
        seed: args.seed,
        log_interval: 0,
    };
    let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(BoardPrinter {
        human: human_side,
    }));
    if args.save.is_none() {
        pipeline = pipeline.frozen();
    }

    let mut human = HumanPlayer::stdio("you");
    let result = match human_side {
        Side::White => pipeline.run(&mut human, &mut agent)?,
        Side::Black => pipeline.run(&mut agent, &mut human)?,
    };

    if args.games > 1 {
        print_section("Results");
        match human_side {
            Side::White => print_result(&result, "Your wins", "Agent wins"),
            Side::Black => print_result(&result, "Agent wins", "Your wins"),
        }
    }

    if let Some(path) = &args.save {
        let metadata = TrainingMetadata {
            episodes_trained: previous + args.games as u64,
            side: Some(human_side.opponent()),
            seed: args.seed,
        };
        save_policy(&policy_to_save(&agent, trained, metadata), path)?;
        print_kv("Saved policy", &path.display().to_string());
    }

    Ok(())
}
