//! Game state on top of `shakmaty`
//!
//! `shakmaty` positions are values without an undo operation, so [`Game`]
//! keeps the stack of earlier states and a Zobrist key per ply. The key
//! history drives repetition based draws.

use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};
use thiserror::Error;

use crate::rules::Rules;

/// Standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock at which a draw may be claimed
const FIFTY_MOVE_PLIES: u32 = 100;
/// Halfmove clock at which the game is drawn without a claim
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Errors while setting up a [`Game`]
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),

    #[error("illegal position: {0}")]
    Position(String),

    #[error("illegal move {0}")]
    IllegalMove(String),
}

/// A chess game: current position plus the history needed to take moves back
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    undo: Vec<Chess>,
    /// Zobrist key of every position reached, the current one last
    keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Game at the standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Game starting at an arbitrary legal position
    pub fn from_position(position: Chess) -> Self {
        let key = zobrist_key(&position);
        Self {
            position,
            undo: Vec::new(),
            keys: vec![key],
        }
    }

    /// Parse a game from FEN
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fen: Fen = fen.trim().parse()?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::Position(e.to_string()))?;
        Ok(Self::from_position(position))
    }

    /// Play a move given in UCI notation (e.g. `e2e4`, `e7e8q`, `e1g1`)
    pub fn play_uci(&mut self, uci: &str) -> Result<Move, GameError> {
        let mv = self
            .find_uci(uci)
            .ok_or_else(|| GameError::IllegalMove(uci.to_string()))?;
        self.make_move(&mv);
        Ok(mv)
    }

    /// Legal move matching a UCI string, if any
    pub fn find_uci(&self, uci: &str) -> Option<Move> {
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| m.to_uci(CastlingMode::Standard).to_string() == uci)
    }

    /// Underlying `shakmaty` position
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// FEN of the current position
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Polyglot compatible Zobrist key of the current position
    pub fn zobrist(&self) -> u64 {
        self.keys.last().copied().unwrap_or_else(|| zobrist_key(&self.position))
    }

    /// Number of moves that can be taken back
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// How many times the current position has occurred, this one included
    pub fn repetitions(&self) -> usize {
        self.occurrences(self.zobrist(), self.position.halfmoves() as usize + 1)
    }

    /// Occurrences of `key` among the last `window` positions reached.
    ///
    /// Positions before the last irreversible move cannot come back, so the
    /// halfmove clock bounds the window.
    fn occurrences(&self, key: u64, window: usize) -> usize {
        self.keys
            .iter()
            .rev()
            .take(window)
            .filter(|&&seen| seen == key)
            .count()
    }

    /// Playing `mv` would reach a claimable draw: the clock hits the fifty
    /// move mark or the resulting position appears for the third time.
    fn claimable_after(&self, mv: &Move) -> bool {
        let mut next = self.position.clone();
        next.play_unchecked(mv);

        let halfmoves = next.halfmoves();
        if halfmoves >= FIFTY_MOVE_PLIES {
            return true;
        }
        self.occurrences(zobrist_key(&next), halfmoves as usize) >= 2
    }
}

impl Rules for Game {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn make_move(&mut self, mv: &Move) {
        let previous = self.position.clone();
        self.position.play_unchecked(mv);
        self.undo.push(previous);
        self.keys.push(zobrist_key(&self.position));
    }

    fn unmake_move(&mut self) {
        debug_assert!(!self.undo.is_empty(), "unmake_move without a matching make_move");
        if let Some(previous) = self.undo.pop() {
            self.position = previous;
            self.keys.pop();
        }
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_game_over(&self) -> bool {
        self.position.is_game_over()
            || self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES
            || self.repetitions() >= 5
    }

    fn can_claim_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_PLIES
            || self.repetitions() >= 3
            || self
                .position
                .legal_moves()
                .iter()
                .any(|mv| self.claimable_after(mv))
    }

    fn turn(&self) -> Color {
        self.position.turn()
    }
}

fn zobrist_key(position: &Chess) -> u64 {
    position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}
