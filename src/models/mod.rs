//! Core data models for the draw oracle.

mod confidence;
mod game;
mod prediction;

pub use confidence::*;
pub use game::*;
pub use prediction::*;
