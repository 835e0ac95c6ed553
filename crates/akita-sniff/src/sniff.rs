//! Read loop: pull chunks from a byte source, print what decodes

use std::io::Write;

use akita_core::AkitaResult;
use akita_wire::{IngestStats, Ingestor, Packet};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{info, warn};

use crate::config::SniffConfig;

/// Decode everything `source` yields until EOF, writing one line per packet
/// to `sink`. Faults are logged and counted, never fatal.
pub async fn run<R, W>(mut source: R, sink: &mut W, config: &SniffConfig) -> AkitaResult<IngestStats>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut ingestor = Ingestor::new(config.ingest.clone())?;
    let mut buf = vec![0u8; config.chunk_size];

    loop {
        let n = source.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        for result in ingestor.ingest(&buf[..n]) {
            match result {
                Ok(packet) => writeln!(sink, "{}", describe(&packet))?,
                Err(e) => warn!(error = %e, "dropped frame"),
            }
        }
    }

    if ingestor.deframer().buffered() > 0 {
        info!(
            bytes = ingestor.deframer().buffered(),
            "source closed with an unterminated frame"
        );
    }

    Ok(ingestor.stats().clone())
}

/// One-line summary of a packet
pub fn describe(packet: &Packet) -> String {
    let mut line = format!(
        "{} dest={} hops={} ctx={} len={}",
        packet.flags,
        packet.destination,
        packet.hops,
        packet.context(),
        packet.data.len()
    );

    if let Some(seq) = packet.link_sequence() {
        line.push_str(&format!(" seq={}", seq));
    }

    if !packet.data.is_empty() {
        line.push(' ');
        match std::str::from_utf8(&packet.data) {
            Ok(text) if text.chars().all(|c| !c.is_control()) => {
                line.push_str(&format!("text={:?}", text));
            }
            _ => line.push_str(&format!("hex={}", hex(&packet.data))),
        }
    }

    line
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
