//! akita-sniff - decode KISS-framed Reticulum traffic
//!
//! Reads raw bytes from a capture file (or stdin) and prints each decoded
//! packet. Pipe a serial port in with e.g.
//! `socat -u /dev/ttyUSB1,raw,b115200 - | akita-sniff`.
//!
//! Logging goes to stderr and honours `RUST_LOG`.

mod config;
mod sniff;

use std::io;

use tokio::fs::File;
use tokio::io::AsyncRead;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::SniffConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = SniffConfig::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())?;

    let source: Box<dyn AsyncRead + Unpin> = match &config.input {
        Some(path) => {
            info!(path = %path.display(), "reading capture");
            Box::new(File::open(path).await?)
        }
        None => {
            info!("reading stdin");
            Box::new(tokio::io::stdin())
        }
    };

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    let stats = sniff::run(source, &mut sink, &config).await?;

    info!(
        bytes = stats.bytes_in,
        frames = stats.frames,
        packets = stats.packets,
        faults = stats.faults(),
        discarded = stats.discarded_bytes,
        "done"
    );
    Ok(())
}
