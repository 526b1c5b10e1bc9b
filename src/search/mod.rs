//! Search engine
//!
//! Fixed depth minimax with alpha-beta pruning, mate distance scoring and
//! move ordering, plus the driver that consults the opening book first.

pub mod alpha_beta;
pub mod minimax;
pub mod ordering;
pub mod params;
pub mod score;
pub mod search;
pub mod stats;

pub use self::alpha_beta::AlphaBeta;
pub use self::minimax::minimax;
pub use self::ordering::{order_moves, ordered_moves};
pub use self::params::SearchParams;
pub use self::score::{Score, MATE_SCORE, MATE_THRESHOLD};
pub use self::search::{Search, SearchResult};
pub use self::stats::SearchStats;
