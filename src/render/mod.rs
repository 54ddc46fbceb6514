pub mod layout;
pub mod renderer;

pub use layout::ScreenLayout;
pub use renderer::{Palette, Renderer};
