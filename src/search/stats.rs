//! Search statistics
//!
//! Diagnostics for a single search invocation: nodes visited, time spent,
//! and whether the move came from the opening book.

use std::fmt;
use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Nodes visited by the alpha-beta search
    pub nodes: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// The move was taken from the opening book
    pub opening_used: bool,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub elapsed: Duration,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Record elapsed time since [`SearchStats::start_timing`]
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
        }
    }

    /// Increment node count
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    /// Increment cutoff count
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    /// Nodes per second over the elapsed time
    pub fn nps(&self) -> u64 {
        let micros = self.elapsed.as_micros() as u64;
        if micros == 0 {
            return 0;
        }
        self.nodes.saturating_mul(1_000_000) / micros
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "nodes {} cutoffs {} time {} nps {} opening {}",
            self.nodes,
            self.cutoffs,
            self.elapsed.as_millis(),
            self.nps(),
            self.opening_used
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nps_without_time_is_zero() {
        let mut stats = SearchStats::new();
        stats.nodes = 100;
        assert_eq!(stats.nps(), 0);

        stats.elapsed = Duration::from_millis(500);
        assert_eq!(stats.nps(), 200);
    }

    #[test]
    fn test_display() {
        let stats = SearchStats {
            nodes: 20,
            elapsed: Duration::from_millis(3),
            ..SearchStats::default()
        };
        assert_eq!(stats.to_string(), "nodes 20 cutoffs 0 time 3 nps 6666 opening false");
    }
}
