pub mod common;
pub mod game;
pub mod pelada;
pub mod player;
pub mod ranking;
