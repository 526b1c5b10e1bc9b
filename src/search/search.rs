//! Search driver
//!
//! Picks the move to play: an opening book move when the book knows the
//! position, otherwise the best root move of a fixed depth alpha-beta search.

use shakmaty::Color;

use super::alpha_beta::AlphaBeta;
use super::ordering::ordered_moves;
use super::params::SearchParams;
use super::score::Score;
use super::stats::SearchStats;
use crate::book::{load_opening_book, OpeningBook};
use crate::error::{Result, SearchError};
use crate::eval::{Evaluator, PieceSquareEval};
use crate::game::Game;
use crate::rules::Rules;

/// Outcome of one search invocation
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Move to play
    pub best_move: M,
    /// Value of `best_move`, `None` when it came from the opening book
    pub score: Option<Score>,
    /// Diagnostics gathered while choosing the move
    pub stats: SearchStats,
}

/// Main search engine
pub struct Search<R: Rules, E = PieceSquareEval> {
    params: SearchParams,
    evaluator: E,
    book: Option<Box<dyn OpeningBook<R>>>,
}

impl Search<Game, PieceSquareEval> {
    /// Search with the default evaluator, loading the book named in `params`.
    ///
    /// A book that cannot be loaded is reported and the engine runs without one.
    pub fn new(params: SearchParams) -> Self {
        let book = params.book_path.as_deref().and_then(load_opening_book);
        let search = Self::with_evaluator(params, PieceSquareEval::new());
        match book {
            Some(book) => search.with_book(book),
            None => search,
        }
    }
}

impl<R, E> Search<R, E>
where
    R: Rules,
    E: Evaluator<R>,
{
    /// Search with a custom evaluator and no opening book
    pub fn with_evaluator(params: SearchParams, evaluator: E) -> Self {
        Self {
            params,
            evaluator,
            book: None,
        }
    }

    /// Consult `book` before searching
    pub fn with_book(mut self, book: impl OpeningBook<R> + 'static) -> Self {
        self.book = Some(Box::new(book));
        self
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn has_book(&self) -> bool {
        self.book.is_some()
    }

    /// Best move at the configured depth
    pub fn search(&self, position: &mut R) -> Result<SearchResult<R::Move>> {
        self.best_move(position, self.params.depth)
    }

    /// Best move for `position` looking `depth` plies ahead.
    ///
    /// A book move, if any, is returned without searching. The position is
    /// restored before returning.
    pub fn best_move(&self, position: &mut R, depth: u8) -> Result<SearchResult<R::Move>> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }

        let mut stats = SearchStats::new();
        stats.start_timing();

        if let Some(book_move) = self.book.as_ref().and_then(|book| book.lookup(&*position)) {
            stats.opening_used = true;
            stats.update_timing();
            tracing::debug!(mv = ?book_move, "book move");
            self.report(&stats);
            return Ok(SearchResult {
                best_move: book_move,
                score: None,
                stats,
            });
        }

        let (best_move, score) = self.search_root(position, depth, &mut stats)?;
        stats.update_timing();
        self.report(&stats);

        Ok(SearchResult {
            best_move,
            score: Some(score),
            stats,
        })
    }

    /// Searched best move and its value, ignoring the opening book
    pub fn evaluate_root(&self, position: &mut R, depth: u8) -> Result<SearchResult<R::Move>> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }

        let mut stats = SearchStats::new();
        stats.start_timing();
        let (best_move, score) = self.search_root(position, depth, &mut stats)?;
        stats.update_timing();

        Ok(SearchResult {
            best_move,
            score: Some(score),
            stats,
        })
    }

    /// Root move loop.
    ///
    /// Every root move gets a full window so its value is exact. On equal
    /// values the move searched first is kept.
    fn search_root(
        &self,
        position: &mut R,
        depth: u8,
        stats: &mut SearchStats,
    ) -> Result<(R::Move, Score)> {
        let maximizing = position.turn() == Color::White;
        let root_moves = ordered_moves(&self.evaluator, &*position, maximizing, self.params.order_moves);
        if root_moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut alpha_beta = AlphaBeta::new(&self.evaluator, stats, self.params.order_moves);
        let mut best: Option<(R::Move, Score)> = None;

        for mv in root_moves {
            let score = {
                let mut child = position.play(&mv);
                if child.can_claim_draw() {
                    Score::Draw
                } else {
                    let score =
                        alpha_beta.search(&mut *child, depth - 1, Score::MIN, Score::MAX, !maximizing)?;
                    score.decay()
                }
            };
            tracing::trace!(mv = ?mv, %score, "root move");

            let improves = match &best {
                None => true,
                Some((_, best_score)) if maximizing => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        best.ok_or(SearchError::NoLegalMoves)
    }

    fn report(&self, stats: &SearchStats) {
        if self.params.debug {
            tracing::info!(
                nodes = stats.nodes,
                cutoffs = stats.cutoffs,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                opening_used = stats.opening_used,
                "search finished"
            );
        } else {
            tracing::debug!(nodes = stats.nodes, opening_used = stats.opening_used, "search finished");
        }
    }
}
