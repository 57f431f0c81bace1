//! The stub HTTP server: bind, route, serve
//!
//! Serves three routes over loopback HTTP/1.1 for the lifetime of the
//! process:
//! - `GET /health` returns 200 with body `ok`
//! - `GET /files` returns the file listing supplied at startup
//! - `POST /open` overwrites the log file with the raw request body
//!
//! Everything else is a 404 with an empty body. Connections are served one
//! at a time: each accepted connection is handled to completion before the
//! next accept.

use crate::{Result, StubConfig, StubError};
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::Http;
use hyper::service::service_fn;
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Response payload for `GET /files`
#[derive(Debug, Serialize)]
struct FilesResponse<'a> {
    success: bool,
    files: &'a [Value],
}

/// Response payload for `POST /open`
#[derive(Debug, Serialize)]
struct OpenResponse {
    success: bool,
}

/// Immutable routing state shared across requests
#[derive(Debug)]
struct Routes {
    log_file: PathBuf,
    files: Vec<Value>,
}

/// A bound stub server ready to serve requests
#[derive(Debug)]
pub struct StubServer {
    routes: Arc<Routes>,
    listener: TcpListener,
}

impl StubServer {
    /// Bind a listener on 127.0.0.1 for the configured port
    ///
    /// A port of 0 asks the OS for any free port; the resolved port is
    /// available through [`StubServer::port`] before serving starts.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::ServerError`] if an explicitly requested port is
    /// already in use, or [`StubError::IoError`] for other bind failures.
    pub async fn bind(config: StubConfig) -> Result<Self> {
        let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                StubError::ServerError(format!("port {} is already in use", config.port))
            } else {
                StubError::from(e)
            }
        })?;

        let routes = Arc::new(Routes {
            log_file: config.log_file,
            files: config.files.unwrap_or_default(),
        });

        Ok(Self { routes, listener })
    }

    /// Get the socket address the server is bound to
    ///
    /// # Errors
    ///
    /// Returns an error if retrieving the local address fails.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(StubError::from)
    }

    /// Get the resolved port the server is bound to
    ///
    /// # Errors
    ///
    /// Returns an error if retrieving the local address fails.
    pub fn port(&self) -> Result<u16> {
        Ok(self.local_addr()?.port())
    }

    /// Serve requests until the process is terminated
    ///
    /// Each accepted connection is served fully before the next accept; a
    /// failed connection is logged and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting a connection fails at the listener
    /// level.
    pub async fn serve(self) -> Result<()> {
        info!("Stub server listening on {}", self.local_addr()?);

        loop {
            let (stream, peer) = self.listener.accept().await?;
            debug!("Connection from {}", peer);

            let routes = Arc::clone(&self.routes);
            let service = service_fn(move |req| {
                let routes = Arc::clone(&routes);
                async move { handle_request(req, &routes).await }
            });

            // One connection at a time: no per-connection task is spawned
            if let Err(e) = Http::new().serve_connection(stream, service).await {
                error!("Connection terminated: {}", e);
            }
        }
    }
}

/// Route a single request by method and exact path
async fn handle_request(
    req: Request<Body>,
    routes: &Routes,
) -> std::result::Result<Response<Body>, StubError> {
    debug!("{} {}", req.method(), req.uri().path());

    match (req.method(), req.uri().path()) {
        (&Method::GET, "/health") => Ok(Response::new(Body::from("ok"))),
        (&Method::GET, "/files") => json_response(&FilesResponse {
            success: true,
            files: &routes.files,
        }),
        (&Method::POST, "/open") => {
            // hyper reads the body per the declared Content-Length; a
            // missing header yields an empty body
            let bytes = hyper::body::to_bytes(req.into_body()).await?;
            let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                StubError::ServerError(format!("request body is not valid UTF-8: {e}"))
            })?;
            tokio::fs::write(&routes.log_file, &text).await?;
            debug!(
                "Wrote {} bytes to {}",
                text.len(),
                routes.log_file.display()
            );
            json_response(&OpenResponse { success: true })
        }
        _ => {
            let response = Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::empty())?;
            Ok(response)
        }
    }
}

/// Build a JSON response from a serializable payload
fn json_response<T: Serialize>(payload: &T) -> std::result::Result<Response<Body>, StubError> {
    let body = serde_json::to_vec(payload)?;
    let response = Response::builder()
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;
    Ok(response)
}
