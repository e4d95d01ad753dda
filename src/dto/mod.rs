//! Wire payloads exchanged with HTTP clients.

pub mod game;
pub mod health;
