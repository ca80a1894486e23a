//! Playlist and queue commands

use anyhow::{Context, Result};
use serde_json::Value;
use volumio_client::VolumioClient;

use crate::output::{field, OutputContext, PlaylistRow, TrackRow};

/// List stored playlists
pub async fn playlists(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    let playlists = client.get_playlists().await?;

    let rows: Vec<PlaylistRow> = playlists
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(|n| n.as_str())
                .map(|name| PlaylistRow {
                    name: name.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    ctx.print(&rows);
    Ok(())
}

/// Show the play queue
pub async fn queue(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    let queue = client.get_queue().await?;
    ctx.print(&queue_rows(&queue));
    Ok(())
}

/// Play a stored playlist
pub async fn play_playlist(client: &VolumioClient, name: &str, ctx: &OutputContext) -> Result<()> {
    client.play_playlist(name).await?;
    ctx.success(&format!("Playing playlist {}", name));
    Ok(())
}

/// Clear the play queue
pub async fn clear(client: &VolumioClient, ctx: &OutputContext) -> Result<()> {
    client.clear_playlist().await?;
    ctx.success("Queue cleared");
    Ok(())
}

/// Replace the queue with an item given as JSON and play it
pub async fn replace_and_play(client: &VolumioClient, item: &str, ctx: &OutputContext) -> Result<()> {
    let item: Value = serde_json::from_str(item).context("Item must be a JSON object")?;
    if !item.is_object() {
        ctx.warn("Item is not a JSON object; the device will most likely ignore it");
    }

    client.replace_and_play(&item).await?;
    ctx.success(&format!("Playing {}", field(&item, "title")));
    Ok(())
}

/// Build queue rows from a `getQueue` response
///
/// Devices answer either `{"queue": [...]}` or a bare array.
fn queue_rows(queue: &Value) -> Vec<TrackRow> {
    let tracks = queue
        .get("queue")
        .and_then(|q| q.as_array())
        .or_else(|| queue.as_array());

    tracks
        .map(|tracks| {
            tracks
                .iter()
                .enumerate()
                .map(|(i, track)| TrackRow {
                    position: i + 1,
                    title: field(track, "name"),
                    artist: field(track, "artist"),
                    album: field(track, "album"),
                })
                .collect()
        })
        .unwrap_or_default()
}
