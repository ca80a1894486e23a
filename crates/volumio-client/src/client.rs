//! Volumio HTTP client implementation

use parking_lot::Mutex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{Result, VolumioError};
use crate::types::{Command, VolumeChange};

/// Default port of the Volumio REST API
pub const DEFAULT_PORT: u16 = 3000;

/// Path prefix shared by every REST method
const API_PREFIX: &str = "/api/v1/";

/// HTTP session used to reach the device
#[derive(Debug)]
struct Session {
    client: Client,
    /// Created by this client, and therefore released by it
    owned: bool,
}

/// Volumio REST API client
///
/// Talks to a single device at `http://{host}:{port}`. Either pass in a
/// shared [`reqwest::Client`] with [`VolumioClient::with_session`] or let
/// the client create its own on first use. Only a session created by the
/// client is released by [`VolumioClient::close`].
#[derive(Debug)]
pub struct VolumioClient {
    host: String,
    port: u16,
    session: Mutex<Option<Session>>,
}

impl VolumioClient {
    /// Create a client that opens its own HTTP session on first request
    ///
    /// # Arguments
    /// * `host` - Hostname or IP address of the device (e.g., "volumio.local")
    /// * `port` - Port of the REST API, usually [`DEFAULT_PORT`]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            session: Mutex::new(None),
        }
    }

    /// Create a client that shares an existing HTTP session
    ///
    /// The session is never released by this client; timeouts and other
    /// transport settings are whatever the caller configured on it.
    pub fn with_session(host: impl Into<String>, port: u16, session: Client) -> Self {
        Self {
            host: host.into(),
            port,
            session: Mutex::new(Some(Session {
                client: session,
                owned: false,
            })),
        }
    }

    /// Get the device host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the device port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL of the device, `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Whether a session is currently available
    pub fn is_open(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Whether the current session was created by this client
    pub fn owns_session(&self) -> bool {
        self.session.lock().as_ref().is_some_and(|s| s.owned)
    }

    /// Release the session if this client created it
    ///
    /// Returns `true` when a session was released. A shared session is
    /// left untouched, and calling this again is a no-op. The next request
    /// opens a fresh session.
    pub fn close(&self) -> bool {
        let mut slot = self.session.lock();
        if slot.as_ref().is_some_and(|s| s.owned) {
            *slot = None;
            debug!(host = %self.host, "Closed owned HTTP session");
            true
        } else {
            false
        }
    }

    /// Resolve a possibly relative URL (e.g., album art) against the device
    ///
    /// Anything starting with `ht` (any case) is taken as already absolute
    /// and returned untouched. An empty input yields the bare base URL.
    /// Other inputs are joined per RFC 3986, which also normalizes them:
    /// `..` segments are resolved and characters not allowed in a URL, such
    /// as spaces, are percent-encoded (`Miles Davis` becomes `Miles%20Davis`).
    pub fn canonic_url(&self, url: Option<&str>) -> Option<String> {
        let url = url?;
        if url.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("ht")) {
            return Some(url.to_string());
        }
        if url.is_empty() {
            return Some(self.base_url());
        }

        match Url::parse(&self.base_url()).and_then(|base| base.join(url)) {
            Ok(joined) => Some(joined.into()),
            Err(e) => {
                warn!(url, error = %e, "Could not resolve URL against device");
                Some(url.to_string())
            }
        }
    }

    // =========================================================================
    // System
    // =========================================================================

    /// Get the system version
    #[instrument(skip(self))]
    pub async fn get_system_version(&self) -> Result<Value> {
        self.get("getSystemVersion", &[]).await
    }

    /// Get the system information
    #[instrument(skip(self))]
    pub async fn get_system_info(&self) -> Result<Value> {
        self.get("getSystemInfo", &[]).await
    }

    /// Get the player state
    #[instrument(skip(self))]
    pub async fn get_state(&self) -> Result<Value> {
        self.get("getState", &[]).await
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Send a command to the `commands` endpoint
    #[instrument(skip(self))]
    pub async fn command(&self, command: Command) -> Result<Value> {
        self.get(command.method(), &command.query()).await
    }

    /// Skip to the next track
    pub async fn next(&self) -> Result<Value> {
        self.command(Command::Next).await
    }

    /// Go back to the previous track
    pub async fn previous(&self) -> Result<Value> {
        self.command(Command::Previous).await
    }

    /// Start playback
    pub async fn play(&self) -> Result<Value> {
        self.command(Command::Play).await
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<Value> {
        self.command(Command::Pause).await
    }

    /// Stop playback
    pub async fn stop(&self) -> Result<Value> {
        self.command(Command::Stop).await
    }

    /// Enable or disable shuffle
    pub async fn set_shuffle(&self, shuffle: bool) -> Result<Value> {
        self.command(Command::Shuffle(shuffle)).await
    }

    /// Enable or disable repeating the whole queue
    pub async fn repeat_all(&self, repeat: bool) -> Result<Value> {
        self.command(Command::Repeat(repeat)).await
    }

    // =========================================================================
    // Volume
    // =========================================================================

    /// Set an absolute volume level
    ///
    /// The level is not range checked here; the device clamps it.
    pub async fn set_volume_level(&self, volume: u32) -> Result<Value> {
        self.command(Command::Volume(VolumeChange::Level(volume)))
            .await
    }

    /// Raise the volume by one device step
    pub async fn volume_up(&self) -> Result<Value> {
        self.command(Command::Volume(VolumeChange::Plus)).await
    }

    /// Lower the volume by one device step
    pub async fn volume_down(&self) -> Result<Value> {
        self.command(Command::Volume(VolumeChange::Minus)).await
    }

    /// Mute the output
    pub async fn mute(&self) -> Result<Value> {
        self.command(Command::Volume(VolumeChange::Mute)).await
    }

    /// Restore the volume from before muting
    pub async fn unmute(&self) -> Result<Value> {
        self.command(Command::Volume(VolumeChange::Unmute)).await
    }

    // =========================================================================
    // Playlists and Queue
    // =========================================================================

    /// List the stored playlists
    #[instrument(skip(self))]
    pub async fn get_playlists(&self) -> Result<Value> {
        self.get("listplaylists", &[]).await
    }

    /// Replace the queue with a stored playlist and play it
    pub async fn play_playlist(&self, name: &str) -> Result<Value> {
        self.command(Command::PlayPlaylist(name.to_string())).await
    }

    /// Clear the play queue
    pub async fn clear_playlist(&self) -> Result<Value> {
        self.command(Command::ClearQueue).await
    }

    /// Get the current play queue
    #[instrument(skip(self))]
    pub async fn get_queue(&self) -> Result<Value> {
        self.get("getQueue", &[]).await
    }

    /// Replace the queue with `item` and start playing it
    ///
    /// `item` is usually an entry taken from a [`browse`](Self::browse)
    /// result and is sent to the device unchanged.
    #[instrument(skip(self, item))]
    pub async fn replace_and_play<T>(&self, item: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        self.post("replaceAndPlay", item).await
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Browse the music library
    ///
    /// Without `uri` the device returns its root sources. Only the
    /// `navigation` object of the response is returned.
    #[instrument(skip(self))]
    pub async fn browse(&self, uri: Option<&str>) -> Result<Value> {
        let query: Vec<(&str, String)> = uri.map(|u| ("uri", u.to_string())).into_iter().collect();

        let mut response = self.get("browse", &query).await?;
        response
            .get_mut("navigation")
            .map(Value::take)
            .ok_or_else(|| VolumioError::invalid_response("browse response has no navigation"))
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Full URL of a REST method; the method is appended verbatim
    fn api_url(&self, method: &str) -> String {
        format!("{}{}{}", self.base_url(), API_PREFIX, method)
    }

    /// Get the session, creating an owned one if none is open
    fn session(&self) -> Result<Client> {
        let mut slot = self.session.lock();
        if let Some(session) = slot.as_ref() {
            return Ok(session.client.clone());
        }

        debug!(host = %self.host, "Opening owned HTTP session");
        let client = Client::builder().build()?;
        *slot = Some(Session {
            client: client.clone(),
            owned: true,
        });
        Ok(client)
    }

    async fn get(&self, method: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.api_url(method);
        let session = self.session()?;
        debug!(%url, ?query, "GET");

        let mut request = session.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn post<T>(&self, method: &str, body: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let url = self.api_url(method);
        let session = self.session()?;
        debug!(%url, "POST");

        let response = session.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Parse a device response
    ///
    /// Some firmware versions answer 200 without a JSON content type for
    /// methods they don't support; those responses become an empty object.
    /// An empty JSON body (a bare acknowledgement) becomes `Value::Null`.
    async fn handle_response(response: Response) -> Result<Value> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(VolumioError::from_status(status));
        }

        if !has_json_content_type(&response) {
            warn!(
                url = %response.url(),
                content_type = ?response.headers().get(CONTENT_TYPE),
                "Response is not JSON, returning empty object"
            );
            return Ok(Value::Object(Map::new()));
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty JSON body");
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Whether the response declares `application/json` (or a `+json` type)
fn has_json_content_type(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_is_lazy() {
        let client = VolumioClient::new("volumio.local", DEFAULT_PORT);
        assert_eq!(client.host(), "volumio.local");
        assert_eq!(client.port(), 3000);
        assert!(!client.is_open());
        assert!(!client.owns_session());
    }

    #[test]
    fn test_api_url_keeps_trailing_slash() {
        let client = VolumioClient::new("192.168.1.20", 3000);
        assert_eq!(
            client.api_url("getState"),
            "http://192.168.1.20:3000/api/v1/getState"
        );
        assert_eq!(
            client.api_url("commands/"),
            "http://192.168.1.20:3000/api/v1/commands/"
        );
    }

    #[test]
    fn test_session_created_once() {
        let client = VolumioClient::new("localhost", 3000);
        client.session().unwrap();
        assert!(client.owns_session());
        client.session().unwrap();
        assert!(client.owns_session());
        assert!(client.is_open());
    }

    #[test]
    fn test_close_owned_session_is_idempotent() {
        let client = VolumioClient::new("localhost", 3000);
        client.session().unwrap();

        assert!(client.close());
        assert!(!client.is_open());
        assert!(!client.owns_session());
        assert!(!client.close());
    }

    #[test]
    fn test_close_without_session_is_noop() {
        let client = VolumioClient::new("localhost", 3000);
        assert!(!client.close());
    }

    #[test]
    fn test_close_never_releases_shared_session() {
        let client = VolumioClient::with_session("localhost", 3000, Client::new());
        assert!(client.is_open());
        assert!(!client.owns_session());

        assert!(!client.close());
        assert!(!client.close());
        assert!(client.is_open());
    }

    #[test]
    fn test_reopen_after_close() {
        let client = VolumioClient::new("localhost", 3000);
        client.session().unwrap();
        client.close();
        client.session().unwrap();
        assert!(client.owns_session());
    }

    #[test]
    fn test_canonic_url_passes_none_through() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(client.canonic_url(None), None);
    }

    #[test]
    fn test_canonic_url_keeps_absolute_urls() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(
            client.canonic_url(Some("http://cdn.example.com/a.jpg")).as_deref(),
            Some("http://cdn.example.com/a.jpg")
        );
        assert_eq!(
            client.canonic_url(Some("HTTPS://cdn.example.com/a.jpg")).as_deref(),
            Some("HTTPS://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_canonic_url_resolves_relative_paths() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(
            client
                .canonic_url(Some("/albumart?cacheid=1&path=/mnt"))
                .as_deref(),
            Some("http://volumio.local:3000/albumart?cacheid=1&path=/mnt")
        );
        assert_eq!(
            client.canonic_url(Some("albumart")).as_deref(),
            Some("http://volumio.local:3000/albumart")
        );
    }

    #[test]
    fn test_canonic_url_short_input() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(
            client.canonic_url(Some("h")).as_deref(),
            Some("http://volumio.local:3000/h")
        );
    }

    #[test]
    fn test_canonic_url_empty_input_is_base_url() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(
            client.canonic_url(Some("")).as_deref(),
            Some("http://volumio.local:3000")
        );
    }

    #[test]
    fn test_canonic_url_percent_encodes_spaces() {
        let client = VolumioClient::new("volumio.local", 3000);
        assert_eq!(
            client
                .canonic_url(Some("/albumart?web=Miles Davis/Kind of Blue"))
                .as_deref(),
            Some("http://volumio.local:3000/albumart?web=Miles%20Davis/Kind%20of%20Blue")
        );
    }
}
