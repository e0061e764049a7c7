//! The contract every decision-maker satisfies

use crate::coords::Edge;
use crate::view::BoardView;

/// A pluggable decision-maker.
///
/// The simulator calls [`Agent::init`] once before any match and
/// [`Agent::choose_move`] once per turn with the current projection. The
/// decision is expected to be a function of the view; agents may keep
/// private memory but nothing in the protocol requires it.
///
/// There is no latency contract here. The match simulator measures each
/// call's wall-clock time and enforces the cumulative budget itself.
pub trait Agent: Send {
    /// One-time setup before any matches. A failure here is not
    /// recoverable: the tournament run aborts rather than playing with a
    /// half-initialized agent.
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Propose a move for the current position.
    ///
    /// Returning `Err` counts as a malformed decision and forfeits the
    /// match, exactly like proposing an illegal edge.
    fn choose_move(&mut self, view: &BoardView) -> anyhow::Result<Edge>;
}

impl std::fmt::Debug for dyn Agent + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<agent>")
    }
}
