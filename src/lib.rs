//! Grid Snake - a wrap-around Snake game for the terminal
//!
//! This library provides:
//! - Core game engine and lifecycle state machine (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - In-memory session stats (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
