//! Escape the Maze: a turn-based terminal maze game.
//!
//! The core (grid model, BFS hint, session, state machine) is plain data
//! with no terminal coupling; `tui` owns all crossterm I/O.

pub mod game;
pub mod grid;
pub mod levels;
pub mod path;
pub mod scores;
pub mod session;
pub mod tui;
