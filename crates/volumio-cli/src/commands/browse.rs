//! Browse commands - music library navigation and URL resolution

use anyhow::Result;
use serde_json::Value;
use volumio_client::VolumioClient;

use crate::output::{field, BrowseRow, OutputContext, OutputFormat};

/// Browse the music library at `uri` (sources when absent)
pub async fn browse(client: &VolumioClient, uri: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let navigation = client.browse(uri).await?;

    match ctx.format {
        OutputFormat::Json => ctx.print_value(&navigation),
        OutputFormat::Table => ctx.print(&browse_rows(&navigation)),
    }
    Ok(())
}

/// Resolve a device-relative URL (e.g., album art) to a full URL
pub fn url(client: &VolumioClient, path: &str) {
    if let Some(url) = client.canonic_url(Some(path)) {
        println!("{}", url);
    }
}

/// Flatten `navigation.lists[].items[]` into rows
///
/// The root browse answers with `navigation.lists` holding sources
/// directly, so items without a `type` fall back to "source".
fn browse_rows(navigation: &Value) -> Vec<BrowseRow> {
    let lists = match navigation.get("lists").and_then(|l| l.as_array()) {
        Some(lists) => lists,
        None => return Vec::new(),
    };

    lists
        .iter()
        .flat_map(|list| match list.get("items").and_then(|i| i.as_array()) {
            Some(items) => items.iter().collect::<Vec<_>>(),
            None => vec![list],
        })
        .map(|item| BrowseRow {
            item_type: item
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("source")
                .to_string(),
            title: if item.get("title").is_some() {
                field(item, "title")
            } else {
                field(item, "name")
            },
            uri: field(item, "uri"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_browse_rows_from_folder() {
        let rows = browse_rows(&json!({
            "prev": {"uri": "music-library"},
            "lists": [{
                "items": [
                    {"type": "folder", "title": "NAS", "uri": "music-library/NAS"},
                    {"type": "song", "title": "So What", "uri": "music-library/NAS/so_what.flac"}
                ]
            }]
        }));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_type, "folder");
        assert_eq!(rows[1].title, "So What");
    }

    #[test]
    fn test_browse_rows_from_sources() {
        let rows = browse_rows(&json!({
            "lists": [
                {"name": "Music Library", "uri": "music-library"},
                {"name": "Web Radio", "uri": "radio"}
            ]
        }));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_type, "source");
        assert_eq!(rows[1].title, "Web Radio");
    }

    #[test]
    fn test_browse_rows_without_lists() {
        assert!(browse_rows(&json!({})).is_empty());
    }
}
