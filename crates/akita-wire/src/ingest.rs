//! Full decoding pipeline: bytes in, packets or faults out
//!
//! A fault on one frame never stops the frames after it; each yields its
//! own result in stream order.

use akita_core::{AkitaError, AkitaResult};
use tracing::{debug, trace, warn};

use crate::{Deframer, DeframerConfig, Packet, RawFrame};

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    pub deframer: DeframerConfig,
    /// Drop frames with nothing between the delimiters instead of reporting
    /// them as truncated headers
    pub skip_empty_frames: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            deframer: DeframerConfig::default(),
            skip_empty_frames: true,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> AkitaResult<()> {
        self.deframer.validate()
    }
}

/// Pipeline counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub bytes_in: u64,
    pub frames: u64,
    pub empty_frames: u64,
    pub packets: u64,
    pub frame_faults: u64,
    pub decode_faults: u64,
    pub header_faults: u64,
    /// Garbage and oversized partial-frame bytes dropped by the deframer
    pub discarded_bytes: u64,
}

impl IngestStats {
    pub fn faults(&self) -> u64 {
        self.frame_faults + self.decode_faults + self.header_faults
    }
}

/// Deframer, frame codec and header parser chained together
#[derive(Debug)]
pub struct Ingestor {
    deframer: Deframer,
    skip_empty_frames: bool,
    stats: IngestStats,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> AkitaResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: IngestConfig) -> Self {
        Ingestor {
            deframer: Deframer::new(config.deframer),
            skip_empty_frames: config.skip_empty_frames,
            stats: IngestStats::default(),
        }
    }

    /// Feed a chunk and decode every frame it completes
    pub fn ingest(&mut self, chunk: &[u8]) -> Vec<AkitaResult<Packet>> {
        self.stats.bytes_in += chunk.len() as u64;

        let mut out = Vec::new();
        for result in self.deframer.feed(chunk) {
            let frame = match result {
                Ok(frame) => frame,
                Err(fault) => {
                    self.stats.frame_faults += 1;
                    out.push(Err(fault.into()));
                    continue;
                }
            };

            self.stats.frames += 1;
            if frame.is_empty() && self.skip_empty_frames {
                trace!("skipping empty frame");
                self.stats.empty_frames += 1;
                continue;
            }

            out.push(self.process_frame(&frame));
        }

        self.stats.discarded_bytes = self.deframer.discarded();
        out
    }

    fn process_frame(&mut self, frame: &RawFrame) -> AkitaResult<Packet> {
        let payload = frame.decode().map_err(|fault| {
            warn!(%fault, len = frame.len(), "frame decode failed");
            self.stats.decode_faults += 1;
            AkitaError::from(fault)
        })?;

        let packet = Packet::parse(&payload).map_err(|fault| {
            warn!(%fault, "header parse failed");
            self.stats.header_faults += 1;
            AkitaError::from(fault)
        })?;

        debug!(
            packet_type = %packet.flags.packet_type,
            destination = %packet.destination,
            hops = packet.hops,
            data_len = packet.data.len(),
            "packet decoded"
        );
        self.stats.packets += 1;
        Ok(packet)
    }

    /// Packets only; faults are counted and logged but not returned
    pub fn ingest_packets(&mut self, chunk: &[u8]) -> Vec<Packet> {
        self.ingest(chunk).into_iter().filter_map(Result::ok).collect()
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn deframer(&self) -> &Deframer {
        &self.deframer
    }

    /// Drop any partial frame, e.g. after the byte source reconnects
    pub fn reset(&mut self) {
        self.deframer.reset();
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Ingestor::with_config(IngestConfig::default())
    }
}
