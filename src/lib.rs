//! # Chequer
//! A two-player chessboard state manager: pieces on an 8x8 grid, moves checked
//! against a single-step movement table, captures recorded and a game over
//! reported when a king falls.
//!
//! It is usable as both a library to embed behind your own rendering and input
//! layers, and a standalone binary speaking a small line based protocol.

pub mod game;
pub mod parsing;
pub mod protocol;
