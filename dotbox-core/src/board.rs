//! Board state and move application with chain-capture scoring

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::{self, BOX_GRID, EDGE_COUNT};

/// Match seat. `First` moves first at the start of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First = 0,
    Second = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Index into per-player arrays (0 or 1)
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Rejection reasons for [`Board::apply_move`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("edge index {0} is outside the board")]
    OutOfRange(usize),
    #[error("edge {0} is already drawn")]
    AlreadyDrawn(usize),
}

/// One game's board: 60 edge cells plus the 5x5 box grid.
///
/// Edges record which player drew them; boxes record which player completed
/// them. Box ownership is derived state: a box belongs to whoever drew its
/// fourth edge, and never changes afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    edges: Vec<Option<Player>>,
    boxes: [[Option<Player>; BOX_GRID as usize]; BOX_GRID as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board: no edges drawn, no boxes owned
    pub fn new() -> Self {
        Self {
            edges: vec![None; EDGE_COUNT],
            boxes: [[None; BOX_GRID as usize]; BOX_GRID as usize],
        }
    }

    /// Draw an edge for `player` and claim any boxes it completes.
    ///
    /// Rejects an out-of-range index or an already-drawn edge before any
    /// state changes. Returns how many boxes the move completed (0, 1 or 2);
    /// each completed box is claimed for `player`.
    pub fn apply_move(&mut self, index: usize, player: Player) -> Result<u32, BoardError> {
        if index >= EDGE_COUNT {
            return Err(BoardError::OutOfRange(index));
        }
        if self.edges[index].is_some() {
            return Err(BoardError::AlreadyDrawn(index));
        }

        self.edges[index] = Some(player);

        let mut completed = 0;
        for (bx, by) in coords::edge_boxes(index) {
            if self.boxes[bx as usize][by as usize].is_some() {
                continue;
            }
            if coords::box_edges(bx, by)
                .iter()
                .all(|&e| self.edges[e].is_some())
            {
                self.boxes[bx as usize][by as usize] = Some(player);
                completed += 1;
            }
        }

        Ok(completed)
    }

    pub fn is_drawn(&self, index: usize) -> bool {
        self.edges.get(index).map_or(false, |e| e.is_some())
    }

    /// Who drew an edge, if anyone
    pub fn edge_owner(&self, index: usize) -> Option<Player> {
        self.edges.get(index).copied().flatten()
    }

    /// Who completed a box, if anyone
    pub fn box_owner(&self, bx: u8, by: u8) -> Option<Player> {
        self.boxes[bx as usize][by as usize]
    }

    /// Number of edges still undrawn
    pub fn remaining_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_none()).count()
    }

    /// Indices of all undrawn edges, in index order
    pub fn undrawn_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_none())
            .map(|(i, _)| i)
    }

    /// True once every edge is drawn
    pub fn is_full(&self) -> bool {
        self.edges.iter().all(|e| e.is_some())
    }

    /// Boxes completed by `player` so far
    pub fn score(&self, player: Player) -> u32 {
        self.boxes
            .iter()
            .flatten()
            .filter(|&&b| b == Some(player))
            .count() as u32
    }
}
