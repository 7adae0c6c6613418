//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine accepts [`Command`]s and exposes its state through accessors and
//! [`GameSnapshot`]; timers, input and drawing live elsewhere.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameSnapshot, LifecycleState, Position, Snake};
