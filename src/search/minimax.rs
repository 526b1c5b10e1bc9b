//! Exhaustive minimax
//!
//! Same terminal rules and mate decay as [`super::AlphaBeta`] without any
//! pruning or ordering. It visits every node of the tree, so it is only
//! practical at small depths; its value is the reference alpha-beta must
//! reproduce.

use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::rules::Rules;

use super::score::{Score, MATE_THRESHOLD};

/// Minimax value of `position` at `depth`, counting visited nodes into `nodes`.
pub fn minimax<R, E>(
    evaluator: &E,
    position: &mut R,
    depth: u8,
    maximizing: bool,
    nodes: &mut u64,
) -> Result<Score>
where
    R: Rules,
    E: Evaluator<R>,
{
    *nodes += 1;

    if position.is_checkmate() {
        return Ok(if maximizing { Score::MIN } else { Score::MAX });
    }
    if position.is_game_over() {
        return Ok(Score::Draw);
    }
    if depth == 0 {
        let value = evaluator.evaluate(position);
        if !(-MATE_THRESHOLD..=MATE_THRESHOLD).contains(&value) {
            return Err(SearchError::EvaluationOutOfRange {
                value,
                limit: MATE_THRESHOLD,
            });
        }
        return Ok(Score::Centipawns(value));
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return Err(SearchError::InconsistentPosition);
    }

    let mut best = if maximizing { Score::MIN } else { Score::MAX };
    for mv in &moves {
        let mut child = position.play(mv);
        let score = minimax(evaluator, &mut *child, depth - 1, !maximizing, nodes)?.decay();
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    Ok(best)
}
