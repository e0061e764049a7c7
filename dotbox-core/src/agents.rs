//! Built-in baseline agents

use anyhow::bail;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::agent::Agent;
use crate::coords::{self, decode, Edge};
use crate::view::BoardView;

/// Uniform random choice among the undrawn edges
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, view: &BoardView) -> anyhow::Result<Edge> {
        match view.undrawn_edges().choose(&mut self.rng) {
            Some(&edge) => Ok(edge),
            None => bail!("no undrawn edges left to choose from"),
        }
    }
}

/// Box-hungry baseline: takes any completing edge, otherwise avoids
/// handing the opponent a 3-sided box, otherwise plays anything.
pub struct GreedyAgent {
    rng: ChaCha8Rng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn choose_move(&mut self, view: &BoardView) -> anyhow::Result<Edge> {
        let candidates = view.undrawn_edges();
        if candidates.is_empty() {
            bail!("no undrawn edges left to choose from");
        }

        let completing: Vec<Edge> = candidates
            .iter()
            .copied()
            .filter(|&e| completes_a_box(view, e))
            .collect();
        if let Some(&edge) = completing.choose(&mut self.rng) {
            return Ok(edge);
        }

        let safe: Vec<Edge> = candidates
            .iter()
            .copied()
            .filter(|&e| !creates_third_side(view, e))
            .collect();
        if let Some(&edge) = safe.choose(&mut self.rng) {
            return Ok(edge);
        }

        Ok(*candidates.choose(&mut self.rng).unwrap())
    }
}

/// Plays a predetermined move sequence, then fails.
///
/// Useful for replay playback and for driving a match from an outside
/// source (a human interface submits moves this way, under the same
/// legality checks as any agent).
pub struct ScriptedAgent {
    moves: Vec<Edge>,
    cursor: usize,
}

impl ScriptedAgent {
    pub fn new(moves: Vec<Edge>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl Agent for ScriptedAgent {
    fn choose_move(&mut self, _view: &BoardView) -> anyhow::Result<Edge> {
        match self.moves.get(self.cursor) {
            Some(&edge) => {
                self.cursor += 1;
                Ok(edge)
            }
            None => bail!("script exhausted after {} moves", self.moves.len()),
        }
    }
}

fn is_drawn_index(view: &BoardView, index: usize) -> bool {
    let edge = decode(index);
    view.is_drawn(edge.x, edge.y, edge.z)
}

/// Number of drawn sides of box (bx, by), from the agent's view
fn drawn_sides(view: &BoardView, bx: u8, by: u8) -> usize {
    coords::box_edges(bx, by)
        .iter()
        .filter(|&&e| is_drawn_index(view, e))
        .count()
}

/// Boxes adjacent to `edge` that lie inside the active grid
fn active_boxes(view: &BoardView, edge: Edge) -> Vec<(u8, u8)> {
    coords::edge_boxes(edge.index())
        .into_iter()
        .filter(|&(bx, by)| (bx as usize) < view.width() && (by as usize) < view.height())
        .collect()
}

fn completes_a_box(view: &BoardView, edge: Edge) -> bool {
    active_boxes(view, edge)
        .iter()
        .any(|&(bx, by)| drawn_sides(view, bx, by) == 3)
}

fn creates_third_side(view: &BoardView, edge: Edge) -> bool {
    active_boxes(view, edge)
        .iter()
        .any(|&(bx, by)| drawn_sides(view, bx, by) == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player};
    use crate::coords::{encode, Orientation, EDGE_COUNT};

    fn view_after(moves: &[usize]) -> BoardView {
        let mut board = Board::new();
        for &index in moves {
            board.apply_move(index, Player::First).unwrap();
        }
        BoardView::project(&board, 5, 5)
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed(7);
        let view = view_after(&[0, 1, 30, 35]);
        for _ in 0..20 {
            let edge = agent.choose_move(&view).unwrap();
            let index = edge.index();
            assert!(index < EDGE_COUNT);
            assert!(!is_drawn_index(&view, index));
        }
    }

    #[test]
    fn test_random_agent_is_deterministic_per_seed() {
        let view = view_after(&[]);
        let mut a = RandomAgent::with_seed(123);
        let mut b = RandomAgent::with_seed(123);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&view).unwrap(),
                b.choose_move(&view).unwrap()
            );
        }
    }

    #[test]
    fn test_greedy_agent_takes_the_open_box() {
        // Box (0, 0) has three sides drawn; the fourth is (1, 0, V)
        let view = view_after(&[
            encode(0, 0, Orientation::Horizontal),
            encode(0, 1, Orientation::Horizontal),
            encode(0, 0, Orientation::Vertical),
        ]);
        let mut agent = GreedyAgent::with_seed(1);
        for _ in 0..10 {
            let edge = agent.choose_move(&view).unwrap();
            assert_eq!(edge, Edge::new(1, 0, Orientation::Vertical));
        }
    }

    #[test]
    fn test_greedy_agent_avoids_third_sides_when_possible() {
        // Box (0, 0) has two sides drawn; adding either remaining side
        // would hand it over
        let view = view_after(&[
            encode(0, 0, Orientation::Horizontal),
            encode(0, 1, Orientation::Horizontal),
        ]);
        let mut agent = GreedyAgent::with_seed(5);
        for _ in 0..20 {
            let edge = agent.choose_move(&view).unwrap();
            assert!(!creates_third_side(&view, edge), "unsafe edge {edge:?}");
        }
    }
}
