//! Search parameters and configuration
//!
//! Controls how deep the search looks, whether moves are ordered,
//! where the opening book lives and whether diagnostics are reported.

use std::path::PathBuf;

/// Default search depth in plies
pub const DEFAULT_DEPTH: u8 = 4;

/// Search parameters for the engine
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search depth in plies
    pub depth: u8,

    /// Order moves with the evaluator's move key before searching them
    pub order_moves: bool,

    /// Polyglot opening book to consult before searching
    pub book_path: Option<PathBuf>,

    /// Report diagnostics after every search
    pub debug: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            order_moves: true,
            book_path: None,
            debug: false,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Enable or disable move ordering
    pub fn order_moves(mut self, enable: bool) -> Self {
        self.order_moves = enable;
        self
    }

    /// Set the opening book path
    pub fn book_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.book_path = Some(path.into());
        self
    }

    /// Enable or disable diagnostics
    pub fn debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SearchParams::new();
        assert_eq!(params.depth, DEFAULT_DEPTH);
        assert!(params.order_moves);
        assert!(params.book_path.is_none());
        assert!(!params.debug);
    }

    #[test]
    fn test_builder() {
        let params = SearchParams::new()
            .depth(6)
            .order_moves(false)
            .book_path("Human.bin")
            .debug(true);
        assert_eq!(params.depth, 6);
        assert!(!params.order_moves);
        assert_eq!(params.book_path, Some(PathBuf::from("Human.bin")));
        assert!(params.debug);
    }
}
