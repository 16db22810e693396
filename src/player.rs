//! Playback controller: owns the playlist, liked set and playback state, and
//! drives the audio engine in response to user commands and poller ticks.
//!
//! State changes are published as [`PlayerEvent`]s to listeners registered
//! with [`Player::subscribe`]; the presentation layer never reads engine
//! internals directly.

mod error;
mod events;
mod model;
mod progress;
mod state;

pub use error::PlayerError;
pub use events::PlayerEvent;
pub use model::Player;
pub use progress::{Progress, format_time};
pub use state::{PlaybackState, PlayerState};

#[cfg(test)]
mod tests;
