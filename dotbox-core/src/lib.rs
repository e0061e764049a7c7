//! DOTBOX Core - Game engine and agent contract
//!
//! This crate provides the core game logic for dots and boxes on the
//! fixed 5x5 box grid:
//! - Edge coordinate codec (linear index <-> (x, y, z) coordinates)
//! - Board state with chain-capture scoring
//! - Ownership-free board projection for agents
//! - The agent contract and baseline agents

pub mod agent;
pub mod agents;
pub mod board;
pub mod coords;
pub mod view;

// Re-exports for convenient access
pub use agent::Agent;
pub use agents::{GreedyAgent, RandomAgent, ScriptedAgent};
pub use board::{Board, BoardError, Player};
pub use coords::{box_edges, decode, edge_boxes, encode, Edge, Orientation, BOX_GRID, DOT_GRID, EDGE_COUNT, H_EDGE_COUNT};
pub use view::BoardView;
