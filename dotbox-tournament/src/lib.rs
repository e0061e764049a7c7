//! DOTBOX Tournament - Match simulation and agent evaluation
//!
//! This crate provides the competitive infrastructure:
//! - Single-match simulation under the agent contract (legality, chain
//!   capture, cumulative time budgets, forced results)
//! - Replay records for every attempted move
//! - Tournament evaluation over many games with seat swapping and
//!   per-half aggregation, sequential or parallel

mod config;
mod evaluator;
mod match_play;

pub use config::{EvalConfig, MatchConfig, DEFAULT_TIME_BUDGET};
pub use evaluator::{Entrant, EntrantSpec, EvalReport, Evaluator, GameProgress, HalfReport};
pub use match_play::{play_match, ForcedReason, MatchEnd, MatchOutcome, Replay, ReplayMove};
