//! Audio output: the engine contract used by the player and its rodio backend.

mod engine;
mod player;
mod sink;

pub use engine::{AudioEngine, EngineError};
pub use player::RodioEngine;

#[cfg(test)]
pub(crate) mod testing;
