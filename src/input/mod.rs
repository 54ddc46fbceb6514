pub mod handler;

pub use handler::{InputAction, InputHandler, SWIPE_THRESHOLD, classify_swipe};
