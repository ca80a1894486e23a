//! Playback commands - transport controls, shuffle and repeat

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use volumio_client::{Command, VolumioClient};

use crate::output::OutputContext;

/// On/off argument for shuffle and repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
        })
    }
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

/// Send a transport command (play, pause, stop, next, previous)
pub async fn playback(client: &VolumioClient, command: Command, ctx: &OutputContext) -> Result<()> {
    let name = command.to_string();
    client.command(command).await?;
    ctx.success(&format!("Sent {}", name));
    Ok(())
}

/// Enable or disable shuffle
pub async fn shuffle(client: &VolumioClient, toggle: Toggle, ctx: &OutputContext) -> Result<()> {
    client.set_shuffle(toggle.into()).await?;
    ctx.success(&format!("Shuffle {}", toggle));
    Ok(())
}

/// Enable or disable repeating the queue
pub async fn repeat(client: &VolumioClient, toggle: Toggle, ctx: &OutputContext) -> Result<()> {
    client.repeat_all(toggle.into()).await?;
    ctx.success(&format!("Repeat {}", toggle));
    Ok(())
}
