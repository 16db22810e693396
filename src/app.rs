//! Application module: the view router and presentation model used by the
//! TUI and runtime.
//!
//! `App` owns the `Player` and keeps a `NowPlaying` snapshot that is updated
//! only from player events.

mod model;
mod now_playing;
mod view;

pub use model::*;
pub use now_playing::NowPlaying;
pub use view::{InputMode, View};
