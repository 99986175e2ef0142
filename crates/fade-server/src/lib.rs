//! fade-server
//!
//! Multi-client async WebSocket server for fading tic-tac-toe.

pub mod config;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod client;
mod lobby_task;
