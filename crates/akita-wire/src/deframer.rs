//! Stream deframer
//!
//! Cuts an arbitrarily chunked byte stream into FEND-delimited frames. Bytes
//! that cannot belong to a frame (anything before the first FEND) are dropped,
//! and an unterminated frame is retained until the next chunk completes it.
//!
//! After every extraction pass the buffer is either empty or starts with an
//! unmatched FEND.

use akita_core::{AkitaError, AkitaResult, FrameFault, DEFAULT_MAX_BUFFER, FRAME_DELIMITER};
use bytes::{Buf, BytesMut};
use tracing::{debug, trace, warn};

use crate::RawFrame;

/// Deframer configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeframerConfig {
    /// Cap on retained bytes of an unterminated frame (`None` = unbounded)
    pub max_buffer: Option<usize>,
}

impl DeframerConfig {
    /// No cap; an endless frame grows the buffer without bound
    pub fn unbounded() -> Self {
        DeframerConfig { max_buffer: None }
    }

    pub fn with_max_buffer(max_buffer: usize) -> Self {
        DeframerConfig {
            max_buffer: Some(max_buffer),
        }
    }

    pub fn validate(&self) -> AkitaResult<()> {
        // A frame needs room for its opening FEND plus at least one byte
        if matches!(self.max_buffer, Some(n) if n < 2) {
            return Err(AkitaError::InvalidConfig(
                "max_buffer must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DeframerConfig {
    fn default() -> Self {
        DeframerConfig {
            max_buffer: Some(DEFAULT_MAX_BUFFER),
        }
    }
}

/// Streaming frame extractor
///
/// One instance per byte source. It owns its buffer exclusively, so feeding
/// two sources into one instance interleaves their frames.
#[derive(Debug, Default)]
pub struct Deframer {
    config: DeframerConfig,
    buffer: BytesMut,
    discarded: u64,
    /// Set after an oversized frame was dropped; its tail up to and
    /// including the closing FEND is still to come
    resync: bool,
}

impl Deframer {
    pub fn new(config: DeframerConfig) -> Self {
        Deframer {
            config,
            buffer: BytesMut::new(),
            discarded: 0,
            resync: false,
        }
    }

    /// Append a chunk and return every frame it completes, in order.
    ///
    /// A [`FrameFault::TooLarge`] is reported in sequence after any frames
    /// extracted before the cap was hit.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<RawFrame, FrameFault>> {
        self.push(chunk);
        std::iter::from_fn(|| self.next_frame()).collect()
    }

    /// Append a chunk without extracting anything
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Extract the next complete frame from the buffer, if any.
    ///
    /// Returns `None` once no further frame can be cut; a retained partial
    /// frame stays buffered for the next [`push`](Self::push).
    pub fn next_frame(&mut self) -> Option<Result<RawFrame, FrameFault>> {
        if self.resync && !self.skip_oversized_tail() {
            return None;
        }

        let Some(start) = find_delimiter(&self.buffer, 0) else {
            if !self.buffer.is_empty() {
                debug!(bytes = self.buffer.len(), "discarding bytes with no frame delimiter");
                self.discarded += self.buffer.len() as u64;
                self.buffer.clear();
            }
            return None;
        };

        if start > 0 {
            debug!(bytes = start, "discarding bytes before frame delimiter");
            self.discarded += start as u64;
            self.buffer.advance(start);
        }

        match find_delimiter(&self.buffer, 1) {
            Some(end) => {
                let frame = self.buffer.split_to(end + 1).freeze();
                trace!(len = frame.len(), "frame extracted");
                Some(Ok(RawFrame::new(frame)))
            }
            None => self.check_retained(),
        }
    }

    /// Drop bytes through the FEND closing the oversized frame. Returns
    /// `false` while that FEND has not arrived yet.
    fn skip_oversized_tail(&mut self) -> bool {
        let Some(end) = find_delimiter(&self.buffer, 0) else {
            self.discarded += self.buffer.len() as u64;
            self.buffer.clear();
            return false;
        };

        debug!(bytes = end + 1, "dropping tail of oversized frame");
        self.discarded += (end + 1) as u64;
        self.buffer.advance(end + 1);
        self.resync = false;
        true
    }

    fn check_retained(&mut self) -> Option<Result<RawFrame, FrameFault>> {
        let limit = self.config.max_buffer?;
        let retained = self.buffer.len();
        if retained <= limit {
            return None;
        }

        warn!(retained, limit, "partial frame exceeds buffer cap, resetting");
        self.discarded += retained as u64;
        self.buffer.clear();
        self.resync = true;
        Some(Err(FrameFault::TooLarge { retained, limit }))
    }

    /// Bytes currently held for an unterminated frame
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes dropped so far as garbage or oversized partial frames
    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Drop any retained partial frame
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.resync = false;
    }
}

fn find_delimiter(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|&b| b == FRAME_DELIMITER)
        .map(|pos| pos + from)
}
