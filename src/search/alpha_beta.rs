//! Minimax with Alpha-Beta pruning
//!
//! White is always the maximizing side and scores are absolute, so the
//! search is written as two symmetric halves instead of negamax.
//!
//! Properties of Alpha-Beta pruning:
//! * The maximizing node only raises alpha, the minimizing node only lowers beta.
//! * Alpha and beta are inherited from ancestors; the root window is unbounded.
//! * Once `beta <= alpha` the remaining siblings cannot change the result.

use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::rules::Rules;

use super::ordering::ordered_moves;
use super::score::{Score, MATE_THRESHOLD};
use super::stats::SearchStats;

/// Recursive alpha-beta search over a borrowed position.
pub struct AlphaBeta<'a, E> {
    evaluator: &'a E,
    stats: &'a mut SearchStats,
    order_moves: bool,
}

impl<'a, E> AlphaBeta<'a, E> {
    pub fn new(evaluator: &'a E, stats: &'a mut SearchStats, order_moves: bool) -> Self {
        Self {
            evaluator,
            stats,
            order_moves,
        }
    }

    /// Value of `position` searched `depth` plies deep inside the `(alpha, beta)` window.
    ///
    /// `maximizing` tells whether the side to move maximizes the score. With
    /// the full window (`Score::MIN`, `Score::MAX`) the result is exactly the
    /// minimax value at the same depth. The position is left as it was found.
    pub fn search<R>(
        &mut self,
        position: &mut R,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Score>
    where
        R: Rules,
        E: Evaluator<R>,
    {
        self.stats.inc_node();

        if position.is_checkmate() {
            // The side to move has been mated
            return Ok(if maximizing { Score::MIN } else { Score::MAX });
        }
        if position.is_game_over() {
            return Ok(Score::Draw);
        }
        if depth == 0 {
            return self.evaluate(position);
        }

        let moves = ordered_moves(self.evaluator, &*position, maximizing, self.order_moves);
        if moves.is_empty() {
            return Err(SearchError::InconsistentPosition);
        }

        if maximizing {
            let mut best = Score::MIN;
            for mv in &moves {
                let score = {
                    let mut child = position.play(mv);
                    let score = self.search(&mut *child, depth - 1, alpha, beta, false)?;
                    score.decay()
                };

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    // Beta cutoff
                    self.stats.inc_cutoff();
                    return Ok(best);
                }
            }
            Ok(best)
        } else {
            let mut best = Score::MAX;
            for mv in &moves {
                let score = {
                    let mut child = position.play(mv);
                    let score = self.search(&mut *child, depth - 1, alpha, beta, true)?;
                    score.decay()
                };

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    // Alpha cutoff
                    self.stats.inc_cutoff();
                    return Ok(best);
                }
            }
            Ok(best)
        }
    }

    /// Leaf value from the evaluator, rejecting values inside the mate band.
    fn evaluate<R>(&self, position: &R) -> Result<Score>
    where
        R: Rules,
        E: Evaluator<R>,
    {
        let value = self.evaluator.evaluate(position);
        if !(-MATE_THRESHOLD..=MATE_THRESHOLD).contains(&value) {
            return Err(SearchError::EvaluationOutOfRange {
                value,
                limit: MATE_THRESHOLD,
            });
        }
        Ok(Score::Centipawns(value))
    }
}
