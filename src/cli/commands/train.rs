//! Train command - self-play training of value-learning agents

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use super::{load_policy, save_policy};
use crate::{
    cli::{
        config::AppConfig,
        output::{print_kv, print_result, print_section},
    },
    game::Side,
    pipeline::{ProgressObserver, TrainingPipeline, TrainingResult},
    players::RandomPlayer,
    ports::Policy,
    value_learning::{LearningAgent, TrainingMetadata},
};

/// Who the White agent trains against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// A second learning agent playing Black
    #[value(name = "self")]
    SelfPlay,
    /// A uniformly random Black player
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Train agents by self-play")]
pub struct TrainArgs {
    /// TOML configuration file ([agent] and [training] tables)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability of a random exploratory move
    #[arg(long)]
    pub exploration_rate: Option<f64>,

    /// Step size of each value update
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Factor applied to the target as it moves to earlier states
    #[arg(long)]
    pub discount: Option<f64>,

    /// Log progress every N episodes (0 disables)
    #[arg(long)]
    pub log_interval: Option<usize>,

    /// Opponent of the White agent
    #[arg(long, short = 'o', value_enum, default_value_t = Opponent::SelfPlay)]
    pub opponent: Opponent,

    /// Output file for White's policy (`.json` for JSON, MessagePack otherwise)
    #[arg(long, default_value = "white.msgpack")]
    pub white_out: PathBuf,

    /// Output file for Black's policy (self-play only)
    #[arg(long, default_value = "black.msgpack")]
    pub black_out: PathBuf,

    /// Continue from the policies already stored at the output paths
    #[arg(long, default_value_t = false)]
    pub resume: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Configuration file values with command-line overrides applied
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.training.episodes = episodes;
        }
        if let Some(seed) = self.seed {
            config.training.seed = Some(seed);
        }
        if let Some(log_interval) = self.log_interval {
            config.training.log_interval = log_interval;
        }
        if let Some(rate) = self.exploration_rate {
            config.agent.exploration_rate = rate;
        }
        if let Some(rate) = self.learning_rate {
            config.agent.learning_rate = rate;
        }
        if let Some(discount) = self.discount {
            config.agent.discount = discount;
        }

        config.validate()?;
        Ok(config)
    }
}

/// A fresh agent, or the one stored at `path` when resuming.
///
/// Returns the agent and the number of episodes it was already trained on.
fn prepare_agent(
    name: &str,
    config: &AppConfig,
    resume: bool,
    path: &std::path::Path,
) -> Result<(LearningAgent, u64)> {
    let mut agent = LearningAgent::new(name, config.agent);
    if !resume {
        return Ok((agent, 0));
    }

    let saved = load_policy(path)?;
    let previous = saved.metadata.episodes_trained;
    info!(
        agent = name,
        path = %path.display(),
        states = saved.values.len(),
        episodes = previous,
        "resuming from saved policy"
    );
    agent.load_values(saved)?;
    Ok((agent, previous))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve_config()?;

    print_section("MiniChess Training");
    print_kv("Episodes", &config.training.episodes.to_string());
    print_kv("Opponent", &format!("{:?}", args.opponent));
    print_kv("Exploration rate", &config.agent.exploration_rate.to_string());
    print_kv("Learning rate", &config.agent.learning_rate.to_string());
    print_kv("Discount", &config.agent.discount.to_string());
    if let Some(seed) = config.training.seed {
        print_kv("Seed", &seed.to_string());
    }

    let (mut white, white_previous) =
        prepare_agent("white", &config, args.resume, &args.white_out)?;

    let mut pipeline = TrainingPipeline::new(config.training.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let episodes = config.training.episodes as u64;
    let result: TrainingResult = match args.opponent {
        Opponent::SelfPlay => {
            let (mut black, black_previous) =
                prepare_agent("black", &config, args.resume, &args.black_out)?;
            let result = pipeline.run(&mut white, &mut black)?;

            let metadata = TrainingMetadata {
                episodes_trained: black_previous + episodes,
                side: Some(Side::Black),
                seed: config.training.seed,
            };
            save_policy(&black.to_saved(metadata), &args.black_out)?;
            print_kv(
                "Black policy",
                &format!("{} ({} states)", args.black_out.display(), black.values().len()),
            );
            result
        }
        Opponent::Random => {
            let mut random = RandomPlayer::new("random");
            info!(opponent = random.name(), "training against random play");
            pipeline.run(&mut white, &mut random)?
        }
    };

    let metadata = TrainingMetadata {
        episodes_trained: white_previous + episodes,
        side: Some(Side::White),
        seed: config.training.seed,
    };
    save_policy(&white.to_saved(metadata), &args.white_out)?;
    print_kv(
        "White policy",
        &format!("{} ({} states)", args.white_out.display(), white.values().len()),
    );

    print_section("Training Results");
    print_result(&result, "White wins", "Black wins");

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}
