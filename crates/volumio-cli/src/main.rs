//! Volumio CLI - Command-line remote control for Volumio music players
//!
//! Every subcommand maps onto one call of the `volumio-client` library.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use volumio_client::{Command, VolumioClient};

use crate::commands::Toggle;
use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "volumio-cli")]
#[command(author, version, about = "Volumio remote control CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Device host name or IP address
    #[arg(long, env = "VOLUMIO_HOST")]
    host: Option<String>,

    /// Device REST API port
    #[arg(short, long, env = "VOLUMIO_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, env = "VOLUMIO_CONFIG")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the device software version
    Version,

    /// Show system information
    Info,

    /// Show the player state
    State,

    /// Start playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    Previous,

    /// Change the volume
    Volume {
        /// Level (e.g. 40) or one of: up, down, mute, unmute
        #[arg(allow_hyphen_values = true)]
        level: String,
    },

    /// Enable or disable shuffle
    Shuffle {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Enable or disable repeating the queue
    Repeat {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// List stored playlists
    Playlists,

    /// Play a stored playlist
    PlayPlaylist {
        /// Playlist name
        name: String,
    },

    /// Show the play queue
    Queue,

    /// Clear the play queue
    Clear,

    /// Browse the music library
    Browse {
        /// Library URI (e.g. music-library/NAS); sources when omitted
        uri: Option<String>,
    },

    /// Replace the queue with an item and play it
    ReplaceAndPlay {
        /// Item as JSON, usually copied from `browse --output json`
        item: String,
    },

    /// Resolve a device-relative URL such as album art
    Url {
        /// Relative or absolute URL
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.host.as_deref(),
        cli.port,
        cli.timeout,
        cli.output.map(Into::into),
        cli.no_color,
    );
    let format = OutputFormat::from_str(&merged.output, true).unwrap_or_default();

    // Create output context
    let ctx = OutputContext::new(format, merged.no_color, cli.quiet);

    let client = create_client(&merged.host, merged.port, merged.timeout)?;

    // Execute command
    match &cli.command {
        Commands::Version => commands::version(&client, &ctx).await?,
        Commands::Info => commands::info(&client, &ctx).await?,
        Commands::State => commands::state(&client, &ctx).await?,
        Commands::Play => commands::playback(&client, Command::Play, &ctx).await?,
        Commands::Pause => commands::playback(&client, Command::Pause, &ctx).await?,
        Commands::Stop => commands::playback(&client, Command::Stop, &ctx).await?,
        Commands::Next => commands::playback(&client, Command::Next, &ctx).await?,
        Commands::Previous => commands::playback(&client, Command::Previous, &ctx).await?,
        Commands::Volume { level } => commands::volume(&client, level, &ctx).await?,
        Commands::Shuffle { state } => commands::shuffle(&client, *state, &ctx).await?,
        Commands::Repeat { state } => commands::repeat(&client, *state, &ctx).await?,
        Commands::Playlists => commands::playlists(&client, &ctx).await?,
        Commands::PlayPlaylist { name } => commands::play_playlist(&client, name, &ctx).await?,
        Commands::Queue => commands::queue(&client, &ctx).await?,
        Commands::Clear => commands::clear(&client, &ctx).await?,
        Commands::Browse { uri } => commands::browse(&client, uri.as_deref(), &ctx).await?,
        Commands::ReplaceAndPlay { item } => {
            commands::replace_and_play(&client, item, &ctx).await?
        }
        Commands::Url { path } => commands::url(&client, path),
    }

    Ok(())
}

/// Create a Volumio client sharing an HTTP session with the configured timeout
fn create_client(host: &str, port: u16, timeout: Duration) -> Result<VolumioClient> {
    let session = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP session")?;
    debug!(host, port, timeout = ?timeout, "Created Volumio client");

    Ok(VolumioClient::with_session(host, port, session))
}

// Implement conversion for OutputFormat to string (for config merge)
impl From<OutputFormat> for &str {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}
