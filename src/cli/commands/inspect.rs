//! Inspect command - summarize a saved policy

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_policy;
use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    game::Board,
    types::StateKey,
};

#[derive(Parser, Debug)]
#[command(about = "Show the settings and best-valued states of a saved policy")]
pub struct InspectArgs {
    /// Path to the saved policy
    pub policy: PathBuf,

    /// Number of top-valued states to show
    #[arg(long, short = 'n', default_value_t = 5)]
    pub top: usize,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = load_policy(&args.policy)?;

    print_section(&format!("Policy {}", args.policy.display()));
    print_kv("Format version", &saved.version.to_string());
    print_kv("States", &format_number(saved.values.len()));
    print_kv(
        "Episodes trained",
        &format_number(saved.metadata.episodes_trained as usize),
    );
    if let Some(side) = saved.metadata.side {
        print_kv("Side", &side.to_string());
    }
    if let Some(seed) = saved.metadata.seed {
        print_kv("Seed", &seed.to_string());
    }
    print_kv(
        "Exploration rate",
        &saved.config.exploration_rate.to_string(),
    );
    print_kv("Learning rate", &saved.config.learning_rate.to_string());
    print_kv("Discount", &saved.config.discount.to_string());

    for (rank, (key, value)) in saved.values.top(args.top).into_iter().enumerate() {
        print_subsection(&format!("#{} value {value:.6}  {key}", rank + 1));
        match StateKey::parse(key) {
            Ok(state) => println!("{}", Board::from_state_key(&state)),
            Err(e) => println!("  (unrenderable: {e})"),
        }
    }

    Ok(())
}
