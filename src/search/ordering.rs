//! Move ordering
//!
//! Alpha-beta prunes more when strong moves are searched first. Moves are
//! keyed with the evaluator's move value and sorted from the side to move's
//! point of view: highest key first for the maximizer, lowest first for the
//! minimizer.

use crate::eval::Evaluator;
use crate::rules::Rules;

/// Sort `moves` from best to worst for the side to move.
///
/// The sort is stable, so equal keys keep the rules engine's order and the
/// result is deterministic.
pub fn order_moves<R, E>(evaluator: &E, position: &R, moves: Vec<R::Move>, maximizing: bool) -> Vec<R::Move>
where
    R: Rules,
    E: Evaluator<R>,
{
    let end_game = evaluator.is_end_game(position);
    let mut keyed: Vec<(i32, R::Move)> = moves
        .into_iter()
        .map(|mv| (evaluator.move_value(position, &mv, end_game), mv))
        .collect();

    if maximizing {
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
    }

    keyed.into_iter().map(|(_, mv)| mv).collect()
}

/// Legal moves of `position`, ordered when `enabled`
pub fn ordered_moves<R, E>(evaluator: &E, position: &R, maximizing: bool, enabled: bool) -> Vec<R::Move>
where
    R: Rules,
    E: Evaluator<R>,
{
    let moves = position.legal_moves();
    if enabled {
        order_moves(evaluator, position, moves, maximizing)
    } else {
        moves
    }
}
