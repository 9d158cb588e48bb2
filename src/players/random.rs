//! Uniform random baseline

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    game::{Board, Move, Side},
    ports::Policy,
};

/// Plays a uniformly random legal move. Useful as an evaluation baseline.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPlayer {
    fn decide(&mut self, legal_moves: &[Move], _board: &Board, _side: Side) -> Result<Move> {
        legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
