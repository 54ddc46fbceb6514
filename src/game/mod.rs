//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine mutates a [`GameState`] one tick at a time and reports what the UI
//! should show as a list of [`GameEvent`]s.

pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod fruit;
pub mod state;

// Re-export commonly used types
pub use config::{Difficulty, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use events::GameEvent;
pub use fruit::{FRUITS, FruitType};
pub use state::{CollisionType, Food, GameState, Phase, Position, Snake, Theme};
