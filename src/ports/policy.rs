//! Policy port - the "choose a move" capability shared by every participant
//!
//! Learning is a separate, optional capability: only players that keep a
//! value table implement [`Learner`], and the training pipeline reaches it
//! through [`Policy::as_learner_mut`]. Human and scripted players never see
//! state notifications or reward calls.

use crate::{
    Result,
    game::{Board, Move, Side},
    types::StateKey,
};

/// A participant that can pick a move.
///
/// # Examples
///
/// ```
/// use minichess::{
///     game::{Board, Move, Side, legal_moves},
///     ports::Policy,
/// };
///
/// struct FirstMove;
///
/// impl Policy for FirstMove {
///     fn decide(&mut self, legal: &[Move], _: &Board, _: Side) -> minichess::Result<Move> {
///         legal.first().copied().ok_or(minichess::Error::NoLegalMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-move"
///     }
/// }
///
/// let board = Board::initial();
/// let legal = legal_moves(&board, Side::White);
/// assert_eq!(FirstMove.decide(&legal, &board, Side::White).unwrap(), legal[0]);
/// ```
pub trait Policy {
    /// Choose one of `legal_moves` for `side` on `board`.
    ///
    /// Callers pass the moves generated for the current board and side; the
    /// returned move must be one of them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] when `legal_moves` is empty, or
    /// an input error for interactive players.
    fn decide(&mut self, legal_moves: &[Move], board: &Board, side: Side) -> Result<Move>;

    /// Display name used in logs and summaries
    fn name(&self) -> &str;

    /// Reseed the player's random number generator.
    ///
    /// Deterministic players ignore this.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Access the learning capability, if this player has one.
    fn as_learner_mut(&mut self) -> Option<&mut dyn Learner> {
        None
    }

    /// Read-only access to the learning capability.
    fn as_learner(&self) -> Option<&dyn Learner> {
        None
    }
}

/// Optional capability of players that learn from finished episodes.
///
/// The orchestrator calls [`Learner::record_state`] after each of the
/// player's own moves has been applied, [`Learner::backpropagate`] once per
/// finished episode with the terminal reward, and [`Learner::reset`] before
/// the next episode.
pub trait Learner {
    /// Append the post-move state to the current episode trace.
    fn record_state(&mut self, state: StateKey);

    /// Propagate the terminal reward backwards through the episode trace.
    fn backpropagate(&mut self, final_reward: f64);

    /// Clear the episode trace. Learned values are kept.
    fn reset(&mut self);

    /// States visited in the current episode, oldest first
    fn trace(&self) -> &[StateKey];
}
