//! # Game API
//! This module contains everything related to the state of a game: the grid,
//! pieces, the move table and the engine validating and applying moves.

use thiserror::Error;

pub mod board;
pub mod coord;
pub mod engine;
pub mod moves;
pub mod piece;
pub mod side;

use coord::{Coord, CoordinateError};
use piece::Piece;
use side::Side;

/// Reasons for a move to be rejected. A rejected move never mutates the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum IllegalMove {
    #[error("No piece stands on {0}")]
    EmptyOrigin(Coord),
    #[error("{piece} on {from} cannot reach {to} in a single step")]
    Unreachable { piece: Piece, from: Coord, to: Coord },
    #[error("{target} is occupied by a friendly piece ({occupant})")]
    FriendlyFire { occupant: Piece, target: Coord },
    #[error("The game is over, {loser} lost")]
    GameOver { loser: Side },
}

/// Errors surfaced by the engine's entry points.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),
    #[error("No cell is selected")]
    NoSelection,
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
}
