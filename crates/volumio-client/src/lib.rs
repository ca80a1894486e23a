//! Volumio Client Library
//!
//! Provides an async client for the REST API of a Volumio music player.
//!
//! # Example
//!
//! ```rust,no_run
//! use volumio_client::{VolumioClient, DEFAULT_PORT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), volumio_client::VolumioError> {
//!     let client = VolumioClient::new("volumio.local", DEFAULT_PORT);
//!
//!     // Current player state
//!     let state = client.get_state().await?;
//!     println!("{}", state["status"]);
//!
//!     // Control playback
//!     client.set_volume_level(40).await?;
//!     client.play().await?;
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! # Shared Sessions
//!
//! Applications that already hold a [`reqwest::Client`] can share it. The
//! client then never releases it:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use volumio_client::VolumioClient;
//!
//! # fn main() -> Result<(), reqwest::Error> {
//! let http = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! let client = VolumioClient::with_session("192.168.1.20", 3000, http.clone());
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs an axum router in place of a device:
//!
//! ```rust,ignore
//! use volumio_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let state = server.client.get_state().await?;
//! ```

mod client;
mod error;
pub mod testing;
mod types;

pub use client::{VolumioClient, DEFAULT_PORT};
pub use error::{BoxError, Result, VolumioError};
pub use types::*;
