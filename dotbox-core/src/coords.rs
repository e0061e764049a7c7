//! Edge coordinate codec for the 5x5 box grid
//!
//! Every move is one of 60 edges: 30 horizontal (x in 0..5, y in 0..6) and
//! 30 vertical (x in 0..6, y in 0..5). The linear index packs horizontal
//! edges first; everything downstream (board storage, replays, legality
//! checks) speaks this index.

use serde::{Deserialize, Serialize};

/// Boxes per side of the grid
pub const BOX_GRID: u8 = 5;

/// Dots per side of the grid
pub const DOT_GRID: u8 = 6;

/// Number of horizontal edges (also the index split point)
pub const H_EDGE_COUNT: usize = 30;

/// Total number of edges
pub const EDGE_COUNT: usize = 60;

/// Edge direction: z = 0 horizontal, z = 1 vertical
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal = 0,
    Vertical = 1,
}

impl Orientation {
    /// The wire value (z component of a move coordinate)
    pub fn z(self) -> u8 {
        self as u8
    }
}

/// A single edge coordinate (x, y, z)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub x: u8,
    pub y: u8,
    pub z: Orientation,
}

impl Edge {
    pub const fn new(x: u8, y: u8, z: Orientation) -> Self {
        Self { x, y, z }
    }

    /// Linear index of this edge. Not range-checked: coordinates outside
    /// the fixed topology may produce an index >= EDGE_COUNT, or alias
    /// another edge. Callers validate the index, not this function.
    pub fn index(self) -> usize {
        encode(self.x, self.y, self.z)
    }

    /// Inverse of [`Edge::index`]. Total on `0..EDGE_COUNT`; indices
    /// outside that range must be rejected by the caller.
    pub fn from_index(index: usize) -> Self {
        decode(index)
    }
}

/// Pack (x, y, z) into a linear edge index
pub fn encode(x: u8, y: u8, z: Orientation) -> usize {
    match z {
        Orientation::Horizontal => x as usize * DOT_GRID as usize + y as usize,
        Orientation::Vertical => H_EDGE_COUNT + x as usize * BOX_GRID as usize + y as usize,
    }
}

/// Unpack a linear edge index into (x, y, z)
pub fn decode(index: usize) -> Edge {
    if index < H_EDGE_COUNT {
        Edge::new(
            (index / DOT_GRID as usize) as u8,
            (index % DOT_GRID as usize) as u8,
            Orientation::Horizontal,
        )
    } else {
        let i = index - H_EDGE_COUNT;
        Edge::new(
            (i / BOX_GRID as usize) as u8,
            (i % BOX_GRID as usize) as u8,
            Orientation::Vertical,
        )
    }
}

/// The four edge indices bounding box (bx, by): top, bottom, left, right
pub fn box_edges(bx: u8, by: u8) -> [usize; 4] {
    [
        encode(bx, by, Orientation::Horizontal),
        encode(bx, by + 1, Orientation::Horizontal),
        encode(bx, by, Orientation::Vertical),
        encode(bx + 1, by, Orientation::Vertical),
    ]
}

/// The box(es) adjacent to an edge. Boundary edges touch one box,
/// interior edges touch two.
pub fn edge_boxes(index: usize) -> Vec<(u8, u8)> {
    let edge = decode(index);
    let mut boxes = Vec::with_capacity(2);

    match edge.z {
        Orientation::Horizontal => {
            if edge.y <= BOX_GRID - 1 {
                boxes.push((edge.x, edge.y));
            }
            if edge.y >= 1 && edge.y <= BOX_GRID {
                boxes.push((edge.x, edge.y - 1));
            }
        }
        Orientation::Vertical => {
            if edge.x <= BOX_GRID - 1 {
                boxes.push((edge.x, edge.y));
            }
            if edge.x >= 1 && edge.x <= BOX_GRID {
                boxes.push((edge.x - 1, edge.y));
            }
        }
    }

    boxes
}
