//! Test utilities for volumio-client
//!
//! Serves an axum router in place of a device so tests can see exactly
//! which requests the client sends.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::VolumioClient;

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: VolumioClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start a server for `router` with a client that owns its session
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{routing::get, Json, Router};
    /// use volumio_client::testing::TestServer;
    ///
    /// let router = Router::new().route(
    ///     "/api/v1/getState",
    ///     get(|| async { Json(serde_json::json!({"status": "play"})) }),
    /// );
    /// let server = TestServer::start(router).await?;
    /// let state = server.client.get_state().await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> io::Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let (addr, shutdown_tx, handle) = Self::serve(router).await?;
        let client = VolumioClient::new(addr.ip().to_string(), addr.port());

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Start a server for `router` with a client sharing `session`
    pub async fn start_with_session<S>(
        router: axum::Router<S>,
        session: reqwest::Client,
    ) -> io::Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let (addr, shutdown_tx, handle) = Self::serve(router).await?;
        let client = VolumioClient::with_session(addr.ip().to_string(), addr.port(), session);

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    async fn serve<S>(
        router: axum::Router<S>,
    ) -> io::Result<(
        SocketAddr,
        tokio::sync::oneshot::Sender<()>,
        tokio::task::JoinHandle<()>,
    )>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok((addr, shutdown_tx, handle))
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &VolumioClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_points_at_server() {
        let server = TestServer::start(axum::Router::new()).await.unwrap();
        assert_eq!(server.client().base_url(), server.base_url());
        server.shutdown().await;
    }
}
