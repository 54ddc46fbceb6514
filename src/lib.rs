//! Snake Arcade - a terminal Snake game with fruit, stones, lives and levels
//!
//! This library provides:
//! - Core game logic and the tick simulation (game module)
//! - The frame-driven tick clock (clock module)
//! - TUI rendering (render module)
//! - Keyboard and mouse input routing (input module)
//! - The status display fed by game events (hud module)
//! - High score persistence (persistence module)
//! - The interactive terminal mode (modes module)

pub mod clock;
pub mod game;
pub mod hud;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod render;
