//! Match simulator - one complete game between two agents
//!
//! Runs the turn loop under the agent contract: legality checks, the
//! chain-capture extra turn, and the cumulative per-player time budget.
//! A rule violation or budget breach ends the match immediately with a
//! forced result; there are no retries.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use dotbox_core::{Agent, Board, BoardView, Edge, Player};

use crate::config::MatchConfig;

/// Why a match was decided off the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcedReason {
    /// Proposed coordinate was malformed, out of range, or already drawn
    InvalidMove,
    /// Cumulative decision time crossed the budget
    Timeout,
}

/// Terminal state of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEnd {
    /// Board exhausted; the winner is whoever owns more boxes
    Natural,
    /// Rule violation or timeout; the winner is declared outright
    Forced { winner: Player, reason: ForcedReason },
}

/// One attempted move, as recorded in the replay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayMove {
    pub mover: Player,
    pub edge: Edge,
}

/// Flat record of a match: board dimensions plus every attempted move in
/// order. Moves are appended before they are validated, so a move that
/// forced the loss is the last entry. A move discarded by the timeout
/// check never makes it in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Replay {
    width: usize,
    height: usize,
    moves: Vec<ReplayMove>,
}

impl Replay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            moves: Vec::new(),
        }
    }

    pub fn push(&mut self, mover: Player, edge: Edge) {
        self.moves.push(ReplayMove { mover, edge });
    }

    pub fn moves(&self) -> &[ReplayMove] {
        &self.moves
    }

    /// The wire form: `[width, height, mover, x, y, z, mover, x, y, z, ...]`
    pub fn flatten(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(2 + self.moves.len() * 4);
        data.push(self.width as u8);
        data.push(self.height as u8);
        for m in &self.moves {
            data.push(m.mover.index() as u8);
            data.push(m.edge.x);
            data.push(m.edge.y);
            data.push(m.edge.z.z());
        }
        data
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flat: Vec<String> = self.flatten().iter().map(u8::to_string).collect();
        write!(f, "{}", flat.join(","))
    }
}

/// Final record of one match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Boxes completed per seat
    pub scores: [u32; 2],
    /// How the match ended
    pub end: MatchEnd,
    /// Cumulative decision time per seat
    pub time_used: [Duration; 2],
    /// Every attempted move
    pub replay: Replay,
}

impl MatchOutcome {
    /// Winning seat. A forced end names its winner outright; a natural
    /// end compares scores, and a tie has no winner.
    pub fn winner(&self) -> Option<Player> {
        match self.end {
            MatchEnd::Forced { winner, .. } => Some(winner),
            MatchEnd::Natural => match self.scores[0].cmp(&self.scores[1]) {
                std::cmp::Ordering::Greater => Some(Player::First),
                std::cmp::Ordering::Less => Some(Player::Second),
                std::cmp::Ordering::Equal => None,
            },
        }
    }
}

/// Play one complete match between two agents.
///
/// `first` holds the first-mover seat. Each turn the current mover sees
/// the projected view and proposes an edge; the proposal's decision time
/// counts against that player's cumulative budget. The budget check fires
/// between moves only, after the call returns - a single slow call can
/// overshoot arbitrarily before being caught.
pub fn play_match(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    config: &MatchConfig,
) -> MatchOutcome {
    let mut board = Board::new();
    let mut scores = [0u32; 2];
    let mut time_used = [Duration::ZERO; 2];
    let mut replay = Replay::new(config.width, config.height);
    let mut mover = Player::First;

    let end = loop {
        if board.is_full() {
            break MatchEnd::Natural;
        }

        let view = BoardView::project(&board, config.width, config.height);
        let agent: &mut dyn Agent = match mover {
            Player::First => &mut *first,
            Player::Second => &mut *second,
        };

        let start = Instant::now();
        let decision = agent.choose_move(&view);
        time_used[mover.index()] += start.elapsed();

        // The budget is checked before the proposal is even looked at;
        // an over-budget move is discarded, not recorded.
        if time_used[mover.index()] > config.time_budget {
            break MatchEnd::Forced {
                winner: mover.opponent(),
                reason: ForcedReason::Timeout,
            };
        }

        let edge = match decision {
            Ok(edge) => edge,
            Err(err) => {
                tracing::debug!("malformed decision from {mover:?}: {err:#}");
                break MatchEnd::Forced {
                    winner: mover.opponent(),
                    reason: ForcedReason::InvalidMove,
                };
            }
        };

        // Record the attempt first so a losing move still shows up in
        // the replay trail.
        replay.push(mover, edge);

        match board.apply_move(edge.index(), mover) {
            Err(err) => {
                tracing::debug!("illegal move from {mover:?}: {err}");
                break MatchEnd::Forced {
                    winner: mover.opponent(),
                    reason: ForcedReason::InvalidMove,
                };
            }
            Ok(completed) => {
                if completed > 0 {
                    // Chain capture: completing any number of boxes earns
                    // exactly one extra turn.
                    scores[mover.index()] += completed;
                } else {
                    mover = mover.opponent();
                }
            }
        }
    };

    MatchOutcome {
        scores,
        end,
        time_used,
        replay,
    }
}
