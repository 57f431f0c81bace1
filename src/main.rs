//! Stub server binary
//!
//! `stub_server <log_file> [port] [files_json]`
//!
//! Prints the bound port to stdout as the first line, then serves requests
//! until the process is terminated. Per-request logging stays on `debug`
//! so stdout carries only the port line by default.

#![allow(unused_crate_dependencies)]

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use stub_server::config::{parse_files_json, StubConfig};
use stub_server::{utils, StubServer};
use tracing::error;

#[derive(Parser)]
#[command(name = "stub_server")]
#[command(about = "Minimal loopback HTTP stub server for CLI integration tests")]
#[command(version)]
struct Cli {
    /// File overwritten with the body of each POST /open request
    log_file: PathBuf,

    /// Port to bind on 127.0.0.1 (0 = ask the OS for a free port)
    #[arg(default_value_t = 0)]
    port: u16,

    /// JSON array served verbatim by GET /files
    files_json: Option<String>,
}

#[tokio::main]
async fn main() {
    // Usage errors exit 1; --help/--version print to stdout and exit 0
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    if let Err(e) = run(cli).await {
        error!("Stub server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> stub_server::Result<()> {
    utils::init_tracing("warn")?;

    let mut config = StubConfig::new(cli.log_file).with_port(cli.port);
    if let Some(raw) = cli.files_json.as_deref() {
        config = config.with_files(parse_files_json(raw)?);
    }

    let server = StubServer::bind(config).await?;

    // Print the resolved port so the invoking test can capture it
    println!("{}", server.port()?);
    std::io::stdout().flush()?;

    server.serve().await
}
