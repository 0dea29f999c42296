//! Adapters - concrete implementations of the crate's ports.

pub mod maze_sim;

pub use maze_sim::MazeSim;
