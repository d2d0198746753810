//! Tic-tac-toe played perfectly by exhaustive minimax search.
//!
//! [`ttt::GameBoard`] holds the 3x3 grid, [`min_max`] searches every reachable game from a
//! position and [`game`] runs a console game against a human.

pub mod game;
pub mod min_max;
pub mod ttt;
