//! Rules engine interface consumed by the search
//!
//! The search never builds positions or moves on its own. It walks a single
//! position through make/unmake and asks it the handful of questions below.

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use shakmaty::Color;

/// Narrow view of a rules engine, as seen by the search.
///
/// One logical position is mutated in place: [`Rules::make_move`] pushes a
/// move and [`Rules::unmake_move`] must restore exactly the position that
/// existed before the most recent unmatched `make_move`.
pub trait Rules {
    /// Opaque move handle produced by the rules engine
    type Move: Clone + PartialEq + Debug;

    /// All legal moves of the current position, in any order
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a legal move to the current position
    fn make_move(&mut self, mv: &Self::Move);

    /// Revert the most recent move
    fn unmake_move(&mut self);

    /// Side to move is checkmated
    fn is_checkmate(&self) -> bool;

    /// Game is over for any reason (checkmate included)
    fn is_game_over(&self) -> bool;

    /// Side to move may claim a draw now or upon its next move
    /// (repetition, fifty-move rule)
    fn can_claim_draw(&self) -> bool;

    /// Side to move
    fn turn(&self) -> Color;

    /// Make `mv` and return a guard that unmakes it when dropped.
    fn play(&mut self, mv: &Self::Move) -> Played<'_, Self>
    where
        Self: Sized,
    {
        Played::new(self, mv)
    }
}

/// A move that is currently applied to a borrowed position.
///
/// Dropping the guard unmakes the move, so the position is restored on every
/// exit path of the scope holding it, early returns and `?` included.
pub struct Played<'a, R: Rules> {
    position: &'a mut R,
}

impl<'a, R: Rules> Played<'a, R> {
    pub fn new(position: &'a mut R, mv: &R::Move) -> Self {
        position.make_move(mv);
        Self { position }
    }
}

impl<R: Rules> Deref for Played<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.position
    }
}

impl<R: Rules> DerefMut for Played<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.position
    }
}

impl<R: Rules> Drop for Played<'_, R> {
    fn drop(&mut self) {
        self.position.unmake_move();
    }
}
