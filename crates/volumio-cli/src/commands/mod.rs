//! Command implementations for volumio-cli

pub mod browse;
pub mod info;
pub mod playback;
pub mod queue;
pub mod volume;

pub use browse::{browse, url};
pub use info::{info, state, version};
pub use playback::{playback, repeat, shuffle, Toggle};
pub use queue::{clear, play_playlist, playlists, queue, replace_and_play};
pub use volume::volume;
