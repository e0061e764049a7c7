//! Configuration types for matches and evaluation runs

use std::time::Duration;

/// Whole-match decision-time budget per player (not per move)
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(24);

/// Configuration for a single match
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Active grid width in boxes
    pub width: usize,
    /// Active grid height in boxes
    pub height: usize,
    /// Cumulative wall-clock budget per player for the whole match
    pub time_budget: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}

impl MatchConfig {
    /// Override the per-player time budget
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }
}

/// Configuration for a tournament evaluation run
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Per-match settings
    pub match_config: MatchConfig,
    /// Games per half; each agent gets this many games as first mover
    pub games_per_side: usize,
    /// Whether matches within a half run in parallel
    pub parallel: bool,
    /// Worker-thread bound for parallel runs (None = rayon default)
    pub workers: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            games_per_side: 100,
            parallel: false,
            workers: None,
        }
    }
}

impl EvalConfig {
    /// Create config with the given number of games per half
    pub fn new(games_per_side: usize) -> Self {
        Self {
            games_per_side,
            ..Default::default()
        }
    }

    /// Set per-match settings
    pub fn with_match_config(mut self, match_config: MatchConfig) -> Self {
        self.match_config = match_config;
        self
    }

    /// Enable parallel match execution
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Bound the worker pool for parallel runs
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
}
