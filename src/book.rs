//! Polyglot opening books
//!
//! A polyglot `.bin` file is a flat array of 16 byte big-endian entries
//! sorted by position key:
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..8   | Zobrist key of the position (polyglot)  |
//! | 8..10  | move                                    |
//! | 10..12 | weight                                  |
//! | 12..16 | learn data (unused)                     |
//!
//! The move packs, from the lowest bits up, to-file, to-rank, from-file,
//! from-rank and promotion piece in 3 bits each. Castling is stored as the
//! king capturing its own rook (`e1h1`).
//!
//! Only reading the file can fail. A partial entry at the end of the file is
//! ignored, and entries that cannot be decoded or that are not legal in the
//! probed position are skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shakmaty::{File, Move, Rank, Role, Square};
use thiserror::Error;

use crate::game::Game;
use crate::rules::Rules;

/// Size in bytes of one book entry
pub const ENTRY_SIZE: usize = 16;

/// Source of known good moves for a position
pub trait OpeningBook<R: Rules> {
    /// A legal move for `position`, or `None` when the book has no entry
    fn lookup(&self, position: &R) -> Option<R::Move>;
}

/// Errors while loading an opening book
#[derive(Error, Debug)]
pub enum BookError {
    #[error("cannot read opening book {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One raw book entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub key: u64,
    pub raw_move: u16,
    pub weight: u16,
    pub learn: u32,
}

impl BookEntry {
    fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> Self {
        let mut key = [0u8; 8];
        key.copy_from_slice(&bytes[0..8]);
        let mut learn = [0u8; 4];
        learn.copy_from_slice(&bytes[12..16]);

        Self {
            key: u64::from_be_bytes(key),
            raw_move: u16::from_be_bytes([bytes[8], bytes[9]]),
            weight: u16::from_be_bytes([bytes[10], bytes[11]]),
            learn: u32::from_be_bytes(learn),
        }
    }

    /// Serialize back to the on-disk layout
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes[0..8].copy_from_slice(&self.key.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.raw_move.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.weight.to_be_bytes());
        bytes[12..16].copy_from_slice(&self.learn.to_be_bytes());
        bytes
    }

    /// Decoded move, `None` for an invalid promotion code
    pub fn book_move(&self) -> Option<BookMove> {
        BookMove::decode(self.raw_move)
    }
}

/// A move as stored in the book, before it is matched against legal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl BookMove {
    pub fn decode(raw: u16) -> Option<Self> {
        let field = |shift: u16| u32::from((raw >> shift) & 7);

        let to = Square::from_coords(File::new(field(0)), Rank::new(field(3)));
        let from = Square::from_coords(File::new(field(6)), Rank::new(field(9)));
        let promotion = match (raw >> 12) & 7 {
            0 => None,
            1 => Some(Role::Knight),
            2 => Some(Role::Bishop),
            3 => Some(Role::Rook),
            4 => Some(Role::Queen),
            _ => return None,
        };

        Some(Self {
            from,
            to,
            promotion,
        })
    }

    pub fn encode(&self) -> u16 {
        let promotion = match self.promotion {
            None => 0,
            Some(Role::Knight) => 1,
            Some(Role::Bishop) => 2,
            Some(Role::Rook) => 3,
            Some(_) => 4,
        };
        let coord = |sq: Square| (u32::from(sq.rank()) << 3) | u32::from(sq.file());
        ((promotion << 12) | (coord(self.from) << 6) | coord(self.to)) as u16
    }

    /// Whether `mv` is the legal move this book move stands for
    pub fn matches(&self, mv: &Move) -> bool {
        match *mv {
            Move::Castle { king, rook } => {
                self.promotion.is_none() && king == self.from && rook == self.to
            }
            _ => mv.from() == Some(self.from) && mv.to() == self.to && mv.promotion() == self.promotion,
        }
    }
}

/// An in-memory polyglot opening book
#[derive(Debug, Clone, Default)]
pub struct PolyglotBook {
    entries: Vec<BookEntry>,
}

impl PolyglotBook {
    /// Read a book from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Parse a book from its raw bytes, dropping a trailing partial entry
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let tail = bytes.len() % ENTRY_SIZE;
        if tail != 0 {
            tracing::warn!(bytes = tail, "ignoring partial entry at the end of the opening book");
        }

        let entries = bytes
            .chunks_exact(ENTRY_SIZE)
            .filter_map(|chunk| <&[u8; ENTRY_SIZE]>::try_from(chunk).ok())
            .map(BookEntry::from_bytes)
            .collect();
        Self::from_entries(entries)
    }

    /// Build a book from entries, sorting them by key
    pub fn from_entries(mut entries: Vec<BookEntry>) -> Self {
        entries.sort_by_key(|entry| entry.key);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries stored for `key`
    pub fn entries_for(&self, key: u64) -> &[BookEntry] {
        let start = self.entries.partition_point(|entry| entry.key < key);
        let end = start + self.entries[start..].partition_point(|entry| entry.key == key);
        &self.entries[start..end]
    }

    /// Highest weighted legal book move for `game`.
    ///
    /// Zero weight entries are ignored and ties go to the entry stored first.
    pub fn find(&self, game: &Game) -> Option<Move> {
        let legal = game.legal_moves();
        let mut best: Option<(u16, Move)> = None;

        for entry in self.entries_for(game.zobrist()) {
            if entry.weight == 0 {
                continue;
            }
            let Some(book_move) = entry.book_move() else {
                continue;
            };
            let Some(mv) = legal.iter().find(|mv| book_move.matches(mv)) else {
                continue;
            };
            if best.as_ref().map_or(true, |(weight, _)| entry.weight > *weight) {
                best = Some((entry.weight, mv.clone()));
            }
        }

        best.map(|(_, mv)| mv)
    }
}

impl OpeningBook<Game> for PolyglotBook {
    fn lookup(&self, position: &Game) -> Option<Move> {
        self.find(position)
    }
}

/// Load a book, degrading to "no book" with a warning when it cannot be read.
pub fn load_opening_book(path: &Path) -> Option<PolyglotBook> {
    match PolyglotBook::open(path) {
        Ok(book) if book.is_empty() => {
            tracing::warn!(path = %path.display(), "opening book has no entries");
            None
        }
        Ok(book) => {
            tracing::debug!(path = %path.display(), entries = book.len(), "opening book loaded");
            Some(book)
        }
        Err(e) => {
            tracing::warn!("error loading opening book: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::CastlingMode;

    fn entry(game: &Game, uci: &str, weight: u16) -> BookEntry {
        let mv = game.find_uci(uci).unwrap();
        let book_move = match mv {
            Move::Castle { king, rook } => BookMove {
                from: king,
                to: rook,
                promotion: None,
            },
            ref other => BookMove {
                from: other.from().unwrap(),
                to: other.to(),
                promotion: other.promotion(),
            },
        };
        BookEntry {
            key: game.zobrist(),
            raw_move: book_move.encode(),
            weight,
            learn: 0,
        }
    }

    fn uci(mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    #[test]
    fn test_decode_e2e4() {
        // from e2 (file 4, rank 1), to e4 (file 4, rank 3)
        let raw = (1 << 9) | (4 << 6) | (3 << 3) | 4;
        let mv = BookMove::decode(raw).unwrap();
        assert_eq!(mv.from, Square::E2);
        assert_eq!(mv.to, Square::E4);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.encode(), raw);
    }

    #[test]
    fn test_decode_rejects_bad_promotion() {
        assert!(BookMove::decode(5 << 12).is_none());
    }

    #[test]
    fn test_entry_bytes_layout() {
        let e = BookEntry {
            key: 0x463b96181691fc9c,
            raw_move: 0x031c,
            weight: 7,
            learn: 0,
        };
        let bytes = e.to_bytes();
        assert_eq!(&bytes[0..8], &[0x46, 0x3b, 0x96, 0x18, 0x16, 0x91, 0xfc, 0x9c]);
        assert_eq!(&bytes[8..10], &[0x03, 0x1c]);
        assert_eq!(&bytes[10..12], &[0x00, 0x07]);
        assert_eq!(BookEntry::from_bytes(&bytes), e);
    }

    #[test]
    fn test_highest_weight_wins() {
        let game = Game::new();
        let book = PolyglotBook::from_entries(vec![
            entry(&game, "d2d4", 10),
            entry(&game, "e2e4", 30),
            entry(&game, "c2c4", 30),
        ]);
        assert_eq!(book.entries_for(game.zobrist()).len(), 3);
        assert_eq!(uci(&book.find(&game).unwrap()), "e2e4");
    }

    #[test]
    fn test_zero_weight_and_illegal_entries_are_skipped() {
        let game = Game::new();
        let mut illegal = entry(&game, "e2e4", 50);
        illegal.raw_move = BookMove {
            from: Square::E2,
            to: Square::E5,
            promotion: None,
        }
        .encode();
        let book = PolyglotBook::from_entries(vec![entry(&game, "g1f3", 0), illegal]);
        assert!(book.find(&game).is_none());
    }

    #[test]
    fn test_castling_entry() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let book = PolyglotBook::from_entries(vec![entry(&game, "e1g1", 1)]);
        let raw = book.entries_for(game.zobrist())[0].raw_move;
        assert_eq!(
            BookMove::decode(raw).unwrap(),
            BookMove {
                from: Square::E1,
                to: Square::H1,
                promotion: None
            }
        );
        assert_eq!(uci(&book.find(&game).unwrap()), "e1g1");
    }

    #[test]
    fn test_partial_trailing_entry_is_ignored() {
        let game = Game::new();
        let mut bytes = entry(&game, "e2e4", 3).to_bytes().to_vec();
        bytes.extend_from_slice(&[0xff; 5]);

        let book = PolyglotBook::from_bytes(&bytes);
        assert_eq!(book.len(), 1);
        assert_eq!(uci(&book.find(&game).unwrap()), "e2e4");
    }

    #[test]
    fn test_short_file_has_no_entries() {
        assert!(PolyglotBook::from_bytes(&[0u8; 15]).is_empty());
    }

    #[test]
    fn test_missing_book_degrades() {
        let path = Path::new("/definitely/not/here/Human.bin");
        assert!(matches!(PolyglotBook::open(path), Err(BookError::Io { .. })));
        assert!(load_opening_book(path).is_none());
    }

    #[test]
    fn test_unknown_position_has_no_entry() {
        let game = Game::new();
        let book = PolyglotBook::from_entries(vec![entry(&game, "e2e4", 1)]);
        let mut after = game.clone();
        after.play_uci("a2a3").unwrap();
        assert!(book.find(&after).is_none());
    }
}
