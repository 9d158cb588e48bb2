//! Observer port - abstraction for training observation
//!
//! Observers collect data during training (progress bars, outcome metrics)
//! without coupling the pipeline to any output format.

use crate::{
    Result,
    game::{GameOutcome, Move, Side},
    types::StateKey,
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_move(...)` - after each applied move
///    - `on_episode_end(episode, outcome, plies)`
/// 3. `on_training_end()` - once
///
/// All methods default to doing nothing.
///
/// # Examples
///
/// ```
/// use minichess::{game::GameOutcome, ports::Observer};
///
/// struct Counter {
///     episodes: usize,
/// }
///
/// impl Observer for Counter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _outcome: GameOutcome,
///         _plies: u32,
///     ) -> minichess::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based index).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// `state` is the serialized board after the move.
    fn on_move(
        &mut self,
        _episode: usize,
        _ply: u32,
        _side: Side,
        _mv: Move,
        _state: &StateKey,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after rewards have been delivered for a finished episode.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, _plies: u32) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        (**self).on_training_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        (**self).on_episode_start(episode)
    }

    fn on_move(
        &mut self,
        episode: usize,
        ply: u32,
        side: Side,
        mv: Move,
        state: &StateKey,
    ) -> Result<()> {
        (**self).on_move(episode, ply, side, mv, state)
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, plies: u32) -> Result<()> {
        (**self).on_episode_end(episode, outcome, plies)
    }

    fn on_training_end(&mut self) -> Result<()> {
        (**self).on_training_end()
    }
}
