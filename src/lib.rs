//! Minimal loopback HTTP stub server backing CLI integration tests
//!
//! This crate provides a tiny HTTP/1.1 server that tests can point a CLI
//! at. It answers a health check (`GET /health`), serves an optional static
//! file listing (`GET /files`) and records the body of each `POST /open`
//! request by overwriting a single log file. Anything else is a 404.
//!
//! The server binds to 127.0.0.1 only. With port 0 it asks the OS for a
//! free port, which the binary prints to stdout so the invoking test can
//! capture it.

#![allow(unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod server;

pub use config::StubConfig;
pub use error::{Result, StubError};
pub use server::StubServer;

/// Shared utilities
pub mod utils {
    /// Initialize tracing for the application
    ///
    /// `RUST_LOG` takes precedence over the supplied default level.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init_tracing(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| crate::StubError::ServerError(e.to_string()))?;

        Ok(())
    }
}
