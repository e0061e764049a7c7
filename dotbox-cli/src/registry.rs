//! Agent registry - resolve agent names to instances
//!
//! The in-process stand-in for a plug-in loader: names map to built-in
//! constructors, populated at startup. Anything implementing the agent
//! contract can be added here.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Result};
use dotbox_core::{Agent, GreedyAgent, RandomAgent};

/// Names accepted by [`create_agent`] and [`agent_factory`]
pub const AGENT_NAMES: [&str; 2] = ["random", "greedy"];

/// Build a single agent instance by name
pub fn create_agent(name: &str, seed: u64) -> Result<Box<dyn Agent>> {
    match name {
        "random" => Ok(Box::new(RandomAgent::with_seed(seed))),
        "greedy" => Ok(Box::new(GreedyAgent::with_seed(seed))),
        _ => bail!(
            "unknown agent '{name}' (available: {})",
            AGENT_NAMES.join(", ")
        ),
    }
}

/// Build a factory producing one instance per call, each with a distinct
/// seed derived from `base_seed`. Parallel runs use this so every
/// in-flight match owns its own agent.
pub fn agent_factory(
    name: &str,
    base_seed: u64,
) -> Result<Box<dyn Fn() -> Box<dyn Agent> + Sync>> {
    // Same per-instance seed advance the sequential path gets from one
    // RNG evolving across games.
    let counter = AtomicU64::new(0);
    match name {
        "random" => Ok(Box::new(move || {
            let offset = counter.fetch_add(1, Ordering::Relaxed);
            Box::new(RandomAgent::with_seed(base_seed.wrapping_add(offset)))
        })),
        "greedy" => Ok(Box::new(move || {
            let offset = counter.fetch_add(1, Ordering::Relaxed);
            Box::new(GreedyAgent::with_seed(base_seed.wrapping_add(offset)))
        })),
        _ => bail!(
            "unknown agent '{name}' (available: {})",
            AGENT_NAMES.join(", ")
        ),
    }
}
