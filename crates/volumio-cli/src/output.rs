//! Output formatting for volumio-cli (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Print rows in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    println!("{}", Table::new(data));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }

    /// Print a device response: key/value lines for tables, raw JSON otherwise
    pub fn print_value(&self, value: &Value) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in value_pairs(value) {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }
}

/// Flatten the top level of a JSON object into displayable pairs
pub fn value_pairs(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect(),
        Value::Null => Vec::new(),
        other => vec![("value".to_string(), display_value(other))],
    }
}

/// Render a JSON value without quotes around plain strings
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Field of a JSON object as display text
pub fn field(value: &Value, key: &str) -> String {
    value.get(key).map(display_value).unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Playlist display for playlists command
#[derive(Debug, Tabled, Serialize)]
pub struct PlaylistRow {
    #[tabled(rename = "Name")]
    pub name: String,
}

/// Track display for queue command
#[derive(Debug, Tabled, Serialize)]
pub struct TrackRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Artist")]
    pub artist: String,
    #[tabled(rename = "Album")]
    pub album: String,
}

/// Library entry display for browse command
#[derive(Debug, Tabled, Serialize)]
pub struct BrowseRow {
    #[tabled(rename = "Type")]
    pub item_type: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "URI")]
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_pairs_for_object() {
        let pairs = value_pairs(&json!({"status": "play", "volume": 42, "title": null}));
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "play".to_string()),
                ("title".to_string(), "-".to_string()),
                ("volume".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_pairs_for_scalar() {
        assert_eq!(
            value_pairs(&json!("ok")),
            vec![("value".to_string(), "ok".to_string())]
        );
        assert!(value_pairs(&Value::Null).is_empty());
    }

    #[test]
    fn test_field_missing() {
        assert_eq!(field(&json!({}), "artist"), "-");
        assert_eq!(field(&json!({"artist": "Miles Davis"}), "artist"), "Miles Davis");
    }
}
