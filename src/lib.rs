// lib.rs
// Library modules for the bingo game and board server

pub mod number;
pub mod additive;
pub mod error;
pub mod shuffle;
pub mod game;
pub mod board;
pub mod svg;
pub mod history;
pub mod config;
pub mod logging;
pub mod handlers;
pub mod server;
pub mod terminal;

pub use board::Board;
pub use error::BingoError;
pub use game::Game;
pub use number::Number;
