//! Volume command

use anyhow::{bail, Result};
use volumio_client::{VolumeChange, VolumioClient};

use crate::output::OutputContext;

/// Parse a volume argument: a level, or up/down/mute/unmute
pub fn parse_volume(arg: &str) -> Result<VolumeChange> {
    let change = match arg.to_lowercase().as_str() {
        "up" | "plus" | "+" => VolumeChange::Plus,
        "down" | "minus" | "-" => VolumeChange::Minus,
        "mute" => VolumeChange::Mute,
        "unmute" => VolumeChange::Unmute,
        other => match other.parse::<u32>() {
            Ok(level) => VolumeChange::Level(level),
            Err(_) => bail!(
                "Unknown volume: {}. Use a level or one of: up, down, mute, unmute",
                arg
            ),
        },
    };
    Ok(change)
}

/// Change the volume
pub async fn volume(client: &VolumioClient, arg: &str, ctx: &OutputContext) -> Result<()> {
    match parse_volume(arg)? {
        VolumeChange::Level(level) => client.set_volume_level(level).await?,
        VolumeChange::Plus => client.volume_up().await?,
        VolumeChange::Minus => client.volume_down().await?,
        VolumeChange::Mute => client.mute().await?,
        VolumeChange::Unmute => client.unmute().await?,
    };

    ctx.success(&format!("Volume {}", arg));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("42").unwrap(), VolumeChange::Level(42));
        assert_eq!(parse_volume("UP").unwrap(), VolumeChange::Plus);
        assert_eq!(parse_volume("-").unwrap(), VolumeChange::Minus);
        assert_eq!(parse_volume("mute").unwrap(), VolumeChange::Mute);
        assert_eq!(parse_volume("unmute").unwrap(), VolumeChange::Unmute);
        assert!(parse_volume("loud").is_err());
    }
}
