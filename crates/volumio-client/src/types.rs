//! Command types for the Volumio `commands` endpoint

use std::fmt;

// =============================================================================
// Volume
// =============================================================================

/// Volume change sent with `cmd=volume`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChange {
    /// Absolute level, passed to the device as-is
    Level(u32),
    Plus,
    Minus,
    Mute,
    Unmute,
}

impl VolumeChange {
    /// Value of the `volume` query parameter
    pub fn as_param(&self) -> String {
        match self {
            Self::Level(level) => level.to_string(),
            Self::Plus => "plus".to_string(),
            Self::Minus => "minus".to_string(),
            Self::Mute => "mute".to_string(),
            Self::Unmute => "unmute".to_string(),
        }
    }
}

impl fmt::Display for VolumeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

// =============================================================================
// Commands
// =============================================================================

/// A playback command understood by the device's `commands` endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Play,
    Pause,
    Stop,
    Volume(VolumeChange),
    Shuffle(bool),
    Repeat(bool),
    PlayPlaylist(String),
    ClearQueue,
}

impl Command {
    /// Method path under `/api/v1/`
    ///
    /// Transport and queue commands go to `commands/`, volume, shuffle and
    /// playlist commands to `commands`. Devices answer both, but the exact
    /// path is kept per command as observed on real firmware.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Next
            | Self::Previous
            | Self::Play
            | Self::Pause
            | Self::Stop
            | Self::Repeat(_)
            | Self::ClearQueue => "commands/",
            Self::Volume(_) | Self::Shuffle(_) | Self::PlayPlaylist(_) => "commands",
        }
    }

    /// Value of the `cmd` query parameter
    pub fn cmd(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "prev",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Volume(_) => "volume",
            Self::Shuffle(_) => "random",
            Self::Repeat(_) => "repeat",
            Self::PlayPlaylist(_) => "playplaylist",
            Self::ClearQueue => "clearQueue",
        }
    }

    /// Full query string pairs, `cmd` first
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("cmd", self.cmd().to_string())];
        match self {
            Self::Volume(change) => query.push(("volume", change.as_param())),
            Self::Shuffle(flag) | Self::Repeat(flag) => query.push(("value", flag.to_string())),
            Self::PlayPlaylist(name) => query.push(("name", name.clone())),
            _ => {}
        }
        query
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cmd())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transport_commands_use_trailing_slash() {
        for command in [
            Command::Next,
            Command::Previous,
            Command::Play,
            Command::Pause,
            Command::Stop,
            Command::ClearQueue,
            Command::Repeat(true),
        ] {
            assert_eq!(command.method(), "commands/", "{:?}", command);
        }
    }

    #[test]
    fn test_volume_commands_have_no_trailing_slash() {
        assert_eq!(Command::Volume(VolumeChange::Level(42)).method(), "commands");
        assert_eq!(Command::Shuffle(false).method(), "commands");
        assert_eq!(Command::PlayPlaylist("x".into()).method(), "commands");
    }

    #[test]
    fn test_previous_maps_to_prev() {
        assert_eq!(Command::Previous.query(), vec![("cmd", "prev".to_string())]);
    }

    #[test]
    fn test_volume_query() {
        assert_eq!(
            Command::Volume(VolumeChange::Level(42)).query(),
            vec![("cmd", "volume".to_string()), ("volume", "42".to_string())]
        );
        assert_eq!(
            Command::Volume(VolumeChange::Unmute).query(),
            vec![("cmd", "volume".to_string()), ("volume", "unmute".to_string())]
        );
    }

    #[test]
    fn test_boolean_values_are_lowercase() {
        assert_eq!(
            Command::Shuffle(true).query(),
            vec![("cmd", "random".to_string()), ("value", "true".to_string())]
        );
        assert_eq!(
            Command::Repeat(false).query(),
            vec![("cmd", "repeat".to_string()), ("value", "false".to_string())]
        );
    }

    #[test]
    fn test_play_playlist_query() {
        assert_eq!(
            Command::PlayPlaylist("Evening Jazz".into()).query(),
            vec![
                ("cmd", "playplaylist".to_string()),
                ("name", "Evening Jazz".to_string())
            ]
        );
    }
}
