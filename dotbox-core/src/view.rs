//! Ownership-free board projection handed to agents
//!
//! Agents only ever observe drawn / not drawn per edge. Ownership stays on
//! the [`Board`]; a renderer gets scores through the match simulator, not
//! through the view.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coords::{decode, Edge, Orientation, DOT_GRID, EDGE_COUNT};

/// Dense 6x6x2 occupancy cube over the active sub-grid.
///
/// Cell (x, y, z) is true iff the matching edge is drawn and inside the
/// active bounds: horizontal edges need `x < width`, vertical edges need
/// `y < height`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardView {
    cells: [[[bool; 2]; DOT_GRID as usize]; DOT_GRID as usize],
    width: usize,
    height: usize,
}

impl BoardView {
    /// Project a board onto the active `width` x `height` sub-grid
    pub fn project(board: &Board, width: usize, height: usize) -> Self {
        let mut cells = [[[false; 2]; DOT_GRID as usize]; DOT_GRID as usize];

        for index in 0..EDGE_COUNT {
            if !board.is_drawn(index) {
                continue;
            }
            let edge = decode(index);
            let visible = match edge.z {
                Orientation::Horizontal => (edge.x as usize) < width,
                Orientation::Vertical => (edge.y as usize) < height,
            };
            if visible {
                cells[edge.x as usize][edge.y as usize][edge.z.z() as usize] = true;
            }
        }

        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_drawn(&self, x: u8, y: u8, z: Orientation) -> bool {
        self.cells[x as usize][y as usize][z.z() as usize]
    }

    /// All undrawn edges of the active topology, scanned x-major.
    ///
    /// This is the legal-move set from an agent's point of view: an edge is
    /// playable exactly when it is in bounds and not yet drawn.
    pub fn undrawn_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for x in 0..=self.width {
            for y in 0..=self.height {
                if x < self.width && !self.cells[x][y][0] {
                    edges.push(Edge::new(x as u8, y as u8, Orientation::Horizontal));
                }
                if y < self.height && !self.cells[x][y][1] {
                    edges.push(Edge::new(x as u8, y as u8, Orientation::Vertical));
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::coords::encode;

    #[test]
    fn test_empty_board_projects_empty() {
        let view = BoardView::project(&Board::new(), 5, 5);
        for x in 0..DOT_GRID {
            for y in 0..DOT_GRID {
                assert!(!view.is_drawn(x, y, Orientation::Horizontal));
                assert!(!view.is_drawn(x, y, Orientation::Vertical));
            }
        }
        assert_eq!(view.undrawn_edges().len(), EDGE_COUNT);
    }

    #[test]
    fn test_drawn_edges_appear_without_ownership() {
        let mut board = Board::new();
        board
            .apply_move(encode(2, 3, Orientation::Horizontal), Player::First)
            .unwrap();
        board
            .apply_move(encode(4, 1, Orientation::Vertical), Player::Second)
            .unwrap();

        let view = BoardView::project(&board, 5, 5);
        assert!(view.is_drawn(2, 3, Orientation::Horizontal));
        assert!(view.is_drawn(4, 1, Orientation::Vertical));
        assert!(!view.is_drawn(0, 0, Orientation::Horizontal));
        assert_eq!(view.undrawn_edges().len(), EDGE_COUNT - 2);
    }

    #[test]
    fn test_projection_masks_outside_active_grid() {
        let mut board = Board::new();
        // Drawn, but outside a 3x3 active grid
        board
            .apply_move(encode(4, 0, Orientation::Horizontal), Player::First)
            .unwrap();
        board
            .apply_move(encode(0, 4, Orientation::Vertical), Player::First)
            .unwrap();
        // Drawn and inside it
        board
            .apply_move(encode(1, 1, Orientation::Horizontal), Player::Second)
            .unwrap();

        let view = BoardView::project(&board, 3, 3);
        assert!(!view.is_drawn(4, 0, Orientation::Horizontal));
        assert!(!view.is_drawn(0, 4, Orientation::Vertical));
        assert!(view.is_drawn(1, 1, Orientation::Horizontal));
    }

    #[test]
    fn test_undrawn_edges_respects_active_bounds() {
        let view = BoardView::project(&Board::new(), 3, 3);
        let edges = view.undrawn_edges();
        // 3x4 horizontal + 4x3 vertical
        assert_eq!(edges.len(), 24);
        assert!(edges
            .iter()
            .all(|e| match e.z {
                Orientation::Horizontal => e.x < 3 && e.y <= 3,
                Orientation::Vertical => e.x <= 3 && e.y < 3,
            }));
    }
}
