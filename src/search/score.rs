//! Search scores
//!
//! A score is a centipawn value, a forced mate at a known distance, or a
//! draw. All three project onto one signed scale (White positive) through
//! [`Score::value`], which is what comparisons use.

use std::cmp::Ordering;
use std::fmt;

use shakmaty::Color;

/// Magnitude of a mate delivered on the board
pub const MATE_SCORE: i32 = 1_000_000;

/// Every mate scores strictly above this magnitude, every evaluation at or below it
pub const MATE_THRESHOLD: i32 = 999_000;

/// Longest mate distance representable above the threshold
pub const MAX_MATE_PLIES: u32 = (MATE_SCORE - MATE_THRESHOLD - 1) as u32;

#[derive(Debug, Clone, Copy)]
pub enum Score {
    /// Static evaluation, `|value| <= MATE_THRESHOLD`
    Centipawns(i32),
    /// `winner` mates in `plies` half-moves
    Mate { winner: Color, plies: u32 },
    /// Drawn outcome
    Draw,
}

impl Score {
    /// Best possible outcome for Black: White is mated now
    pub const MIN: Score = Score::Mate {
        winner: Color::Black,
        plies: 0,
    };

    /// Best possible outcome for White: Black is mated now
    pub const MAX: Score = Score::Mate {
        winner: Color::White,
        plies: 0,
    };

    /// Score of a checkmate on the board, `loser` being the side to move
    pub fn mated(loser: Color) -> Self {
        Score::Mate {
            winner: loser.other(),
            plies: 0,
        }
    }

    /// Position on the unified scale, White positive
    pub fn value(&self) -> i64 {
        match *self {
            Score::Centipawns(cp) => cp as i64,
            Score::Draw => 0,
            Score::Mate { winner, plies } => {
                let magnitude = MATE_SCORE as i64 - plies.min(MAX_MATE_PLIES) as i64;
                match winner {
                    Color::White => magnitude,
                    Color::Black => -magnitude,
                }
            }
        }
    }

    /// The same score seen one ply further from the mate.
    ///
    /// Mates lose one unit of magnitude per ply so that shorter mates stay
    /// preferred; other scores are unchanged.
    pub fn decay(self) -> Self {
        match self {
            Score::Mate { winner, plies } => Score::Mate {
                winner,
                plies: (plies + 1).min(MAX_MATE_PLIES),
            },
            other => other,
        }
    }

    pub fn is_mate(&self) -> bool {
        matches!(self, Score::Mate { .. })
    }

    /// Half-moves to mate, if this is a mate score
    pub fn mate_plies(&self) -> Option<u32> {
        match *self {
            Score::Mate { plies, .. } => Some(plies),
            _ => None,
        }
    }

    /// Side that is winning, `None` when level
    pub fn leading(&self) -> Option<Color> {
        match self.value().signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Score::Centipawns(cp) => write!(f, "cp {cp}"),
            Score::Draw => write!(f, "draw"),
            Score::Mate { winner, plies } => {
                // Full moves, negative when Black mates
                let moves = (plies as i64 + 1) / 2;
                match winner {
                    Color::White => write!(f, "mate {moves}"),
                    Color::Black => write!(f, "mate -{moves}"),
                }
            }
        }
    }
}
