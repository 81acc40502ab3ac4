//! Core Chain Reaction game logic: board representation, player types, the
//! explosion cascade, and the per-session state machine.

mod board;
pub mod cascade;
mod player;
mod state;

pub use board::{Board, Cell, DimensionError, Position, MAX_DIM, MIN_DIM};
pub use cascade::CascadeReport;
pub use player::Player;
pub use state::{winner, GameMode, GameSession, MoveError};
