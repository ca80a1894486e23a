//! Info commands - device version, system info and player state

use anyhow::Result;
use volumio_client::VolumioClient;

use crate::output::OutputContext;

/// Show the device software version
pub async fn version(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    let version = client.get_system_version().await?;
    ctx.print_value(&version);
    Ok(())
}

/// Show system information
pub async fn info(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    let info = client.get_system_info().await?;
    ctx.print_value(&info);
    Ok(())
}

/// Show the player state, with album art resolved to a full URL
pub async fn state(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    let mut state = client.get_state().await?;

    if let Some(albumart) = state.get("albumart").and_then(|v| v.as_str()) {
        if let Some(url) = client.canonic_url(Some(albumart)) {
            state["albumart"] = url.into();
        }
    }

    ctx.print_value(&state);
    Ok(())
}
