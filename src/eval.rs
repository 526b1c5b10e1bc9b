//! Static evaluation - material plus Piece-Square Tables (PSQT)
//!
//! Scores are absolute: positive is good for White, negative for Black.
//! The search maximizes for White and minimizes for Black, so no side to
//! move flip happens here.

use shakmaty::{Board, Color, Move, Piece, Position, Role, Square};

use crate::game::Game;
use crate::rules::Rules;

/// Evaluation strategy used by the search
pub trait Evaluator<R: Rules> {
    /// Static value of a leaf position, White positive
    fn evaluate(&self, position: &R) -> i32;

    /// Coarse game phase classification used to bias move ordering
    fn is_end_game(&self, position: &R) -> bool;

    /// Ordering key for a candidate move, White positive
    fn move_value(&self, position: &R, mv: &R::Move, end_game: bool) -> i32;
}

// ============================================================================
// MATERIAL VALUES (centipawns)
// ============================================================================
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

// ============================================================================
// PIECE-SQUARE TABLES (White's point of view)
// ============================================================================
// Index 0 = a1, 7 = h1, 56 = a8. Black squares are mirrored vertically.

#[rustfmt::skip]
const PAWN_PSQT: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PSQT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PSQT: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PSQT: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5, // seventh rank
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PSQT: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// King in the middle game: stay castled, away from the centre
#[rustfmt::skip]
const KING_PSQT: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// King in the end game: walk to the centre
#[rustfmt::skip]
const KING_ENDGAME_PSQT: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Material value of a piece kind
pub fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Piece-square bonus of `piece` standing on `square`
pub fn psqt(piece: Piece, square: Square, end_game: bool) -> i32 {
    let table = match piece.role {
        Role::Pawn => &PAWN_PSQT,
        Role::Knight => &KNIGHT_PSQT,
        Role::Bishop => &BISHOP_PSQT,
        Role::Rook => &ROOK_PSQT,
        Role::Queen => &QUEEN_PSQT,
        Role::King if end_game => &KING_ENDGAME_PSQT,
        Role::King => &KING_PSQT,
    };

    let square = match piece.color {
        Color::White => square,
        Color::Black => square.flip_vertical(),
    };
    table[usize::from(square)]
}

/// End game when queens are off, or both remain with at most one minor piece
pub fn is_end_game(board: &Board) -> bool {
    let queens = board.queens().count();
    let minors = (board.knights() | board.bishops()).count();
    queens == 0 || (queens == 2 && minors <= 1)
}

/// Default evaluator: material plus piece-square tables
#[derive(Debug, Default, Clone, Copy)]
pub struct PieceSquareEval;

impl PieceSquareEval {
    pub fn new() -> Self {
        Self
    }

    /// Material and PSQT balance of a board, White minus Black
    pub fn evaluate_board(&self, board: &Board) -> i32 {
        let end_game = is_end_game(board);
        let mut score = 0;

        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                let value = role_value(piece.role) + psqt(piece, square, end_game);
                match piece.color {
                    Color::White => score += value,
                    Color::Black => score -= value,
                }
            }
        }

        score
    }

    fn capture_value(&self, board: &Board, mv: &Move) -> i32 {
        if mv.is_en_passant() {
            return PAWN_VALUE;
        }
        let victim = mv.capture().map(role_value).unwrap_or(0);
        let attacker = mv
            .from()
            .and_then(|sq| board.piece_at(sq))
            .map(|piece| role_value(piece.role))
            .unwrap_or(0);
        victim - attacker
    }
}

impl Evaluator<Game> for PieceSquareEval {
    fn evaluate(&self, position: &Game) -> i32 {
        self.evaluate_board(position.position().board())
    }

    fn is_end_game(&self, position: &Game) -> bool {
        is_end_game(position.position().board())
    }

    fn move_value(&self, position: &Game, mv: &Move, end_game: bool) -> i32 {
        let turn = position.turn();

        if mv.is_promotion() {
            return match turn {
                Color::White => i32::MAX,
                Color::Black => i32::MIN,
            };
        }

        let Some(from) = mv.from() else {
            return 0;
        };
        let piece = Piece {
            color: turn,
            role: mv.role(),
        };
        // Castling is scored by where the king lands.
        let to = match mv.castling_side() {
            Some(side) => side.king_to(turn),
            None => mv.to(),
        };

        let position_change = psqt(piece, to, end_game) - psqt(piece, from, end_game);
        let capture = if mv.is_capture() {
            self.capture_value(position.position().board(), mv)
        } else {
            0
        };

        let value = capture + position_change;
        match turn {
            Color::White => value,
            Color::Black => -value,
        }
    }
}
