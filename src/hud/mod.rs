pub mod status;

pub use status::{FinalSummary, Hud};
