//! Snake on a wrapping grid
//!
//! This library provides:
//! - Core game logic (game module): a fixed-tick engine on a toroidal grid
//! - TUI rendering (render module)
//! - Key-event translation (input module)
//! - Session statistics (metrics module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
