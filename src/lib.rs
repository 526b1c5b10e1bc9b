pub mod book;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

pub use book::{OpeningBook, PolyglotBook};
pub use error::SearchError;
pub use eval::{Evaluator, PieceSquareEval};
pub use game::Game;
pub use rules::Rules;
pub use search::{Score, Search, SearchParams, SearchResult, SearchStats};
